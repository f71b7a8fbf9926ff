use axum::{
    routing::{get, put},
    Extension, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::api::rest::dto;
use crate::api::rest::handlers::{
    addresses, contacts, employees, establishments, members, phones, platforms, roles,
    social_links,
};
use crate::domain::service::Service;

/// Mounts every organization endpoint. The host wraps them in bearer auth.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let org = Router::new()
        .route(
            "/social-media-platforms",
            get(platforms::list_platforms).post(platforms::create_platform),
        )
        .route(
            "/social-media-platforms/{id}",
            get(platforms::get_platform)
                .put(platforms::update_platform)
                .delete(platforms::delete_platform),
        )
        .route(
            "/employee-roles",
            get(roles::list_roles).post(roles::create_role),
        )
        .route(
            "/employee-roles/{id}",
            get(roles::get_role)
                .put(roles::update_role)
                .delete(roles::delete_role),
        )
        .route(
            "/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            "/employees/{id}",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee),
        )
        .route(
            "/employees/{id}/password",
            put(employees::set_employee_password),
        )
        .route(
            "/establishments",
            get(establishments::list_establishments).post(establishments::create_establishment),
        )
        .route(
            "/establishments/{id}",
            get(establishments::get_establishment)
                .put(establishments::update_establishment)
                .delete(establishments::delete_establishment),
        )
        .route(
            "/establishments/{establishment_id}/addresses",
            get(addresses::list_addresses).post(addresses::create_address),
        )
        .route(
            "/establishments/{establishment_id}/addresses/{id}",
            get(addresses::get_address)
                .put(addresses::update_address)
                .delete(addresses::delete_address),
        )
        .route(
            "/establishments/{establishment_id}/contacts",
            get(contacts::list_contacts).post(contacts::create_contact),
        )
        .route(
            "/establishments/{establishment_id}/contacts/{id}",
            get(contacts::get_contact)
                .put(contacts::update_contact)
                .delete(contacts::delete_contact),
        )
        .route(
            "/establishments/{establishment_id}/phones",
            get(phones::list_phones).post(phones::create_phone),
        )
        .route(
            "/establishments/{establishment_id}/phones/{id}",
            get(phones::get_phone)
                .put(phones::update_phone)
                .delete(phones::delete_phone),
        )
        .route(
            "/establishments/{establishment_id}/members",
            get(members::list_members).post(members::create_member),
        )
        .route(
            "/establishments/{establishment_id}/members/{id}",
            get(members::get_member)
                .put(members::update_member)
                .delete(members::delete_member),
        )
        .route(
            "/establishments/{establishment_id}/social-media",
            get(social_links::list_social_links).post(social_links::create_social_link),
        )
        .route(
            "/establishments/{establishment_id}/social-media/{id}",
            get(social_links::get_social_link)
                .put(social_links::update_social_link)
                .delete(social_links::delete_social_link),
        )
        .layer(Extension(service));

    router.merge(org)
}

#[derive(OpenApi)]
#[openapi(components(schemas(
    dto::PlatformDto,
    dto::CreatePlatformReq,
    dto::UpdatePlatformReq,
    dto::RoleDto,
    dto::CreateRoleReq,
    dto::UpdateRoleReq,
    dto::EmployeeDto,
    dto::CreateEmployeeReq,
    dto::UpdateEmployeeReq,
    dto::SetPasswordReq,
    dto::EstablishmentDto,
    dto::CreateEstablishmentReq,
    dto::UpdateEstablishmentReq,
    dto::AddressDto,
    dto::CreateAddressReq,
    dto::UpdateAddressReq,
    dto::ContactDto,
    dto::CreateContactReq,
    dto::UpdateContactReq,
    dto::PhoneDto,
    dto::CreatePhoneReq,
    dto::UpdatePhoneReq,
    dto::MemberDto,
    dto::CreateMemberReq,
    dto::UpdateMemberReq,
    dto::SocialLinkDto,
    dto::CreateSocialLinkReq,
    dto::UpdateSocialLinkReq,
)))]
pub struct OrgAdminApiDoc;
