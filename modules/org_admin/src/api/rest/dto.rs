use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::contract::model::{
    Employee, EmployeePatch, EmployeeRole, EmployeeRolePatch, Establishment,
    EstablishmentAddress, EstablishmentAddressPatch, EstablishmentContact,
    EstablishmentContactPatch, EstablishmentMember, EstablishmentMemberPatch, EstablishmentPatch,
    EstablishmentPhone, EstablishmentPhonePatch, EstablishmentSocialMedia,
    EstablishmentSocialMediaPatch, NewEmployee, NewEmployeeRole, NewEstablishment,
    NewEstablishmentAddress, NewEstablishmentContact, NewEstablishmentMember,
    NewEstablishmentPhone, NewEstablishmentSocialMedia, NewSocialMediaPlatform,
    SocialMediaPlatform, SocialMediaPlatformPatch,
};

/// Absent field -> `None`, explicit `null` -> `Some(None)`.
fn nullable<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

fn default_true() -> bool {
    true
}

// ---- social media platforms ----

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlatformDto {
    pub id: Uuid,
    pub name: String,
    pub base_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreatePlatformReq {
    pub name: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Partial update; `null` clears `base_url`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdatePlatformReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub base_url: Option<Option<String>>,
}

impl From<SocialMediaPlatform> for PlatformDto {
    fn from(p: SocialMediaPlatform) -> Self {
        Self {
            id: p.id,
            name: p.name,
            base_url: p.base_url,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<CreatePlatformReq> for NewSocialMediaPlatform {
    fn from(req: CreatePlatformReq) -> Self {
        Self {
            name: req.name,
            base_url: req.base_url,
        }
    }
}

impl From<UpdatePlatformReq> for SocialMediaPlatformPatch {
    fn from(req: UpdatePlatformReq) -> Self {
        Self {
            name: req.name,
            base_url: req.base_url,
        }
    }
}

// ---- employee roles ----

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateRoleReq {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateRoleReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

impl From<EmployeeRole> for RoleDto {
    fn from(r: EmployeeRole) -> Self {
        Self {
            id: r.id,
            name: r.name,
            description: r.description,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl From<CreateRoleReq> for NewEmployeeRole {
    fn from(req: CreateRoleReq) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

impl From<UpdateRoleReq> for EmployeeRolePatch {
    fn from(req: UpdateRoleReq) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

// ---- employees ----

/// Employee as returned by the API; the password hash is never included.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmployeeDto {
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

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateEmployeeReq {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role_id: Uuid,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateEmployeeReq {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,
    #[serde(default)]
    pub role_id: Option<Uuid>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct SetPasswordReq {
    pub password: String,
}

impl std::fmt::Debug for SetPasswordReq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetPasswordReq")
            .field("password", &"***")
            .finish()
    }
}

impl From<Employee> for EmployeeDto {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            first_name: e.first_name,
            last_name: e.last_name,
            email: e.email,
            phone: e.phone,
            role_id: e.role_id,
            is_active: e.is_active,
            has_password: e.has_password,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

impl From<CreateEmployeeReq> for NewEmployee {
    fn from(req: CreateEmployeeReq) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            role_id: req.role_id,
            is_active: req.is_active,
        }
    }
}

impl From<UpdateEmployeeReq> for EmployeePatch {
    fn from(req: UpdateEmployeeReq) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            role_id: req.role_id,
            is_active: req.is_active,
        }
    }
}

// ---- establishments ----

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EstablishmentDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateEstablishmentReq {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateEstablishmentReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub website: Option<Option<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl From<Establishment> for EstablishmentDto {
    fn from(e: Establishment) -> Self {
        Self {
            id: e.id,
            name: e.name,
            description: e.description,
            website: e.website,
            is_active: e.is_active,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

impl From<CreateEstablishmentReq> for NewEstablishment {
    fn from(req: CreateEstablishmentReq) -> Self {
        Self {
            name: req.name,
            description: req.description,
            website: req.website,
            is_active: req.is_active,
        }
    }
}

impl From<UpdateEstablishmentReq> for EstablishmentPatch {
    fn from(req: UpdateEstablishmentReq) -> Self {
        Self {
            name: req.name,
            description: req.description,
            website: req.website,
            is_active: req.is_active,
        }
    }
}

// ---- addresses ----

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddressDto {
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

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateAddressReq {
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    /// The first address of an establishment is primary regardless.
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateAddressReq {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub state: Option<Option<String>>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub is_primary: Option<bool>,
}

impl From<EstablishmentAddress> for AddressDto {
    fn from(a: EstablishmentAddress) -> Self {
        Self {
            id: a.id,
            establishment_id: a.establishment_id,
            street: a.street,
            city: a.city,
            state: a.state,
            postal_code: a.postal_code,
            country: a.country,
            is_primary: a.is_primary,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

impl From<CreateAddressReq> for NewEstablishmentAddress {
    fn from(req: CreateAddressReq) -> Self {
        Self {
            street: req.street,
            city: req.city,
            state: req.state,
            postal_code: req.postal_code,
            country: req.country,
            is_primary: req.is_primary,
        }
    }
}

impl From<UpdateAddressReq> for EstablishmentAddressPatch {
    fn from(req: UpdateAddressReq) -> Self {
        Self {
            street: req.street,
            city: req.city,
            state: req.state,
            postal_code: req.postal_code,
            country: req.country,
            is_primary: req.is_primary,
        }
    }
}

// ---- contacts ----

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactDto {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub name: String,
    pub email: String,
    pub position: Option<String>,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateContactReq {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateContactReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub position: Option<Option<String>>,
    #[serde(default)]
    pub is_primary: Option<bool>,
}

impl From<EstablishmentContact> for ContactDto {
    fn from(c: EstablishmentContact) -> Self {
        Self {
            id: c.id,
            establishment_id: c.establishment_id,
            name: c.name,
            email: c.email,
            position: c.position,
            is_primary: c.is_primary,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl From<CreateContactReq> for NewEstablishmentContact {
    fn from(req: CreateContactReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            position: req.position,
            is_primary: req.is_primary,
        }
    }
}

impl From<UpdateContactReq> for EstablishmentContactPatch {
    fn from(req: UpdateContactReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            position: req.position,
            is_primary: req.is_primary,
        }
    }
}

// ---- phones ----

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PhoneDto {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub phone_number: String,
    pub label: Option<String>,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreatePhoneReq {
    pub phone_number: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdatePhoneReq {
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub label: Option<Option<String>>,
    #[serde(default)]
    pub is_primary: Option<bool>,
}

impl From<EstablishmentPhone> for PhoneDto {
    fn from(p: EstablishmentPhone) -> Self {
        Self {
            id: p.id,
            establishment_id: p.establishment_id,
            phone_number: p.phone_number,
            label: p.label,
            is_primary: p.is_primary,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<CreatePhoneReq> for NewEstablishmentPhone {
    fn from(req: CreatePhoneReq) -> Self {
        Self {
            phone_number: req.phone_number,
            label: req.label,
            is_primary: req.is_primary,
        }
    }
}

impl From<UpdatePhoneReq> for EstablishmentPhonePatch {
    fn from(req: UpdatePhoneReq) -> Self {
        Self {
            phone_number: req.phone_number,
            label: req.label,
            is_primary: req.is_primary,
        }
    }
}

// ---- members ----

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberDto {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub employee_id: Uuid,
    pub role_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateMemberReq {
    pub employee_id: Uuid,
    pub role_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateMemberReq {
    #[serde(default)]
    pub role_id: Option<Uuid>,
}

impl From<EstablishmentMember> for MemberDto {
    fn from(m: EstablishmentMember) -> Self {
        Self {
            id: m.id,
            establishment_id: m.establishment_id,
            employee_id: m.employee_id,
            role_id: m.role_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<CreateMemberReq> for NewEstablishmentMember {
    fn from(req: CreateMemberReq) -> Self {
        Self {
            employee_id: req.employee_id,
            role_id: req.role_id,
        }
    }
}

impl From<UpdateMemberReq> for EstablishmentMemberPatch {
    fn from(req: UpdateMemberReq) -> Self {
        Self {
            role_id: req.role_id,
        }
    }
}

// ---- social media links ----

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SocialLinkDto {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub platform_id: Uuid,
    pub handle: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateSocialLinkReq {
    pub platform_id: Uuid,
    pub handle: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateSocialLinkReq {
    #[serde(default)]
    pub platform_id: Option<Uuid>,
    #[serde(default)]
    pub handle: Option<String>,
}

impl From<EstablishmentSocialMedia> for SocialLinkDto {
    fn from(s: EstablishmentSocialMedia) -> Self {
        Self {
            id: s.id,
            establishment_id: s.establishment_id,
            platform_id: s.platform_id,
            handle: s.handle,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

impl From<CreateSocialLinkReq> for NewEstablishmentSocialMedia {
    fn from(req: CreateSocialLinkReq) -> Self {
        Self {
            platform_id: req.platform_id,
            handle: req.handle,
        }
    }
}

impl From<UpdateSocialLinkReq> for EstablishmentSocialMediaPatch {
    fn from(req: UpdateSocialLinkReq) -> Self {
        Self {
            platform_id: req.platform_id,
            handle: req.handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let absent: UpdateEstablishmentReq = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.description, None);

        let null: UpdateEstablishmentReq =
            serde_json::from_value(json!({ "description": null })).unwrap();
        assert_eq!(null.description, Some(None));

        let set: UpdateEstablishmentReq =
            serde_json::from_value(json!({ "description": "x" })).unwrap();
        assert_eq!(set.description, Some(Some("x".to_string())));
    }

    #[test]
    fn create_defaults_and_unknown_fields() {
        let req: CreateEstablishmentReq = serde_json::from_value(json!({ "name": "A" })).unwrap();
        assert!(req.is_active);

        let req: CreateAddressReq = serde_json::from_value(json!({
            "street": "1 Main St", "city": "Springfield", "postal_code": "12345", "country": "US"
        }))
        .unwrap();
        assert!(!req.is_primary);

        assert!(serde_json::from_value::<CreateRoleReq>(json!({ "name": "A", "x": 1 })).is_err());
    }

    #[test]
    fn set_password_debug_is_redacted() {
        let req = SetPasswordReq {
            password: "hunter22".into(),
        };
        assert!(!format!("{req:?}").contains("hunter22"));
    }
}
