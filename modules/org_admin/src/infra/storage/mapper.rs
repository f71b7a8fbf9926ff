//! Entity <-> contract conversions.

use sea_orm::{ActiveValue::NotSet, Set};

use crate::contract::model::{
    Employee, EmployeeCredentials, EmployeeRole, Establishment, EstablishmentAddress,
    EstablishmentContact, EstablishmentMember, EstablishmentPhone, EstablishmentSocialMedia,
    SocialMediaPlatform,
};
use crate::domain::repo::AddressKey;
use crate::domain::values::match_key;
use crate::infra::storage::entity::{
    address, contact, employee, establishment, member, phone, platform, role, social_link,
};

impl From<platform::Model> for SocialMediaPlatform {
    fn from(m: platform::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            base_url: m.base_url,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn platform_am(p: &SocialMediaPlatform) -> platform::ActiveModel {
    platform::ActiveModel {
        id: Set(p.id),
        name: Set(p.name.clone()),
        name_key: Set(match_key(&p.name)),
        base_url: Set(p.base_url.clone()),
        created_at: Set(p.created_at),
        updated_at: Set(p.updated_at),
    }
}

impl From<role::Model> for EmployeeRole {
    fn from(m: role::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn role_am(r: &EmployeeRole) -> role::ActiveModel {
    role::ActiveModel {
        id: Set(r.id),
        name: Set(r.name.clone()),
        name_key: Set(match_key(&r.name)),
        description: Set(r.description.clone()),
        created_at: Set(r.created_at),
        updated_at: Set(r.updated_at),
    }
}

impl From<employee::Model> for Employee {
    fn from(m: employee::Model) -> Self {
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            phone: m.phone,
            role_id: m.role_id,
            is_active: m.is_active,
            has_password: m.password_hash.is_some(),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<employee::Model> for EmployeeCredentials {
    fn from(m: employee::Model) -> Self {
        Self {
            employee_id: m.id,
            email: m.email,
            password_hash: m.password_hash,
            is_active: m.is_active,
        }
    }
}

/// Leaves `password_hash` untouched unless the caller sets it.
pub fn employee_am(e: &Employee) -> employee::ActiveModel {
    employee::ActiveModel {
        id: Set(e.id),
        first_name: Set(e.first_name.clone()),
        last_name: Set(e.last_name.clone()),
        email: Set(e.email.clone()),
        phone: Set(e.phone.clone()),
        role_id: Set(e.role_id),
        is_active: Set(e.is_active),
        password_hash: NotSet,
        created_at: Set(e.created_at),
        updated_at: Set(e.updated_at),
    }
}

impl From<establishment::Model> for Establishment {
    fn from(m: establishment::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            website: m.website,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn establishment_am(e: &Establishment) -> establishment::ActiveModel {
    establishment::ActiveModel {
        id: Set(e.id),
        name: Set(e.name.clone()),
        name_key: Set(match_key(&e.name)),
        description: Set(e.description.clone()),
        website: Set(e.website.clone()),
        is_active: Set(e.is_active),
        created_at: Set(e.created_at),
        updated_at: Set(e.updated_at),
    }
}

impl From<address::Model> for EstablishmentAddress {
    fn from(m: address::Model) -> Self {
        Self {
            id: m.id,
            establishment_id: m.establishment_id,
            street: m.street,
            city: m.city,
            state: m.state,
            postal_code: m.postal_code,
            country: m.country,
            is_primary: m.is_primary,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn address_am(a: &EstablishmentAddress) -> address::ActiveModel {
    address::ActiveModel {
        id: Set(a.id),
        establishment_id: Set(a.establishment_id),
        street: Set(a.street.clone()),
        city: Set(a.city.clone()),
        state: Set(a.state.clone()),
        postal_code: Set(a.postal_code.clone()),
        country: Set(a.country.clone()),
        match_key: Set(AddressKey::from(a).match_key()),
        is_primary: Set(a.is_primary),
        created_at: Set(a.created_at),
        updated_at: Set(a.updated_at),
    }
}

impl From<contact::Model> for EstablishmentContact {
    fn from(m: contact::Model) -> Self {
        Self {
            id: m.id,
            establishment_id: m.establishment_id,
            name: m.name,
            email: m.email,
            position: m.position,
            is_primary: m.is_primary,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn contact_am(c: &EstablishmentContact) -> contact::ActiveModel {
    contact::ActiveModel {
        id: Set(c.id),
        establishment_id: Set(c.establishment_id),
        name: Set(c.name.clone()),
        email: Set(c.email.clone()),
        position: Set(c.position.clone()),
        is_primary: Set(c.is_primary),
        created_at: Set(c.created_at),
        updated_at: Set(c.updated_at),
    }
}

impl From<phone::Model> for EstablishmentPhone {
    fn from(m: phone::Model) -> Self {
        Self {
            id: m.id,
            establishment_id: m.establishment_id,
            phone_number: m.phone_number,
            label: m.label,
            is_primary: m.is_primary,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn phone_am(p: &EstablishmentPhone) -> phone::ActiveModel {
    phone::ActiveModel {
        id: Set(p.id),
        establishment_id: Set(p.establishment_id),
        phone_number: Set(p.phone_number.clone()),
        label: Set(p.label.clone()),
        is_primary: Set(p.is_primary),
        created_at: Set(p.created_at),
        updated_at: Set(p.updated_at),
    }
}

impl From<member::Model> for EstablishmentMember {
    fn from(m: member::Model) -> Self {
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

pub fn member_am(m: &EstablishmentMember) -> member::ActiveModel {
    member::ActiveModel {
        id: Set(m.id),
        establishment_id: Set(m.establishment_id),
        employee_id: Set(m.employee_id),
        role_id: Set(m.role_id),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
    }
}

impl From<social_link::Model> for EstablishmentSocialMedia {
    fn from(m: social_link::Model) -> Self {
        Self {
            id: m.id,
            establishment_id: m.establishment_id,
            platform_id: m.platform_id,
            handle: m.handle,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn social_link_am(s: &EstablishmentSocialMedia) -> social_link::ActiveModel {
    social_link::ActiveModel {
        id: Set(s.id),
        establishment_id: Set(s.establishment_id),
        platform_id: Set(s.platform_id),
        handle: Set(s.handle.clone()),
        created_at: Set(s.created_at),
        updated_at: Set(s.updated_at),
    }
}
