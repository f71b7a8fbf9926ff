//! Pure models for inter-module use (no serde).

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialMediaPlatform {
    pub id: Uuid,
    pub name: String,
    pub base_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSocialMediaPlatform {
    pub name: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SocialMediaPlatformPatch {
    pub name: Option<String>,
    pub base_url: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRole {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEmployeeRole {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EmployeeRolePatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

/// The password hash never leaves storage; `has_password` says whether one is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role_id: Uuid,
    pub is_active: bool,
    pub has_password: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role_id: Uuid,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EmployeePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub role_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

/// What the login flow needs to know about an employee.
#[derive(Debug, Clone)]
pub struct EmployeeCredentials {
    pub employee_id: Uuid,
    pub email: String,
    pub password_hash: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Establishment {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEstablishment {
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EstablishmentPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstablishmentAddress {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub street: String,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEstablishmentAddress {
    pub street: String,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EstablishmentAddressPatch {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<Option<String>>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub is_primary: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstablishmentContact {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub name: String,
    pub email: String,
    pub position: Option<String>,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEstablishmentContact {
    pub name: String,
    pub email: String,
    pub position: Option<String>,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EstablishmentContactPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub position: Option<Option<String>>,
    pub is_primary: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstablishmentPhone {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub phone_number: String,
    pub label: Option<String>,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEstablishmentPhone {
    pub phone_number: String,
    pub label: Option<String>,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EstablishmentPhonePatch {
    pub phone_number: Option<String>,
    pub label: Option<Option<String>>,
    pub is_primary: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstablishmentMember {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub employee_id: Uuid,
    pub role_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEstablishmentMember {
    pub employee_id: Uuid,
    pub role_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct EstablishmentMemberPatch {
    pub role_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstablishmentSocialMedia {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub platform_id: Uuid,
    pub handle: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEstablishmentSocialMedia {
    pub platform_id: Uuid,
    pub handle: String,
}

#[derive(Debug, Clone, Default)]
pub struct EstablishmentSocialMediaPatch {
    pub platform_id: Option<Uuid>,
    pub handle: Option<String>,
}
