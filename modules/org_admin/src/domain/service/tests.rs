use std::sync::Arc;

use modkit::api::{PageParams, PageRequest};
use modkit_db::{ConnectOpts, DbHandle};
use sea_orm_migration::MigratorTrait;
use tracing_test::traced_test;
use uuid::Uuid;

use super::{on_duplicate, Service, ServiceConfig, ADMINISTRATOR_ROLE, ESTABLISHMENT};
use crate::contract::model::{
    Employee, EmployeePatch, EmployeeRole, Establishment, EstablishmentAddressPatch,
    EstablishmentContactPatch, EstablishmentMemberPatch, EstablishmentPatch,
    EstablishmentPhonePatch, NewEmployee, NewEmployeeRole, NewEstablishment,
    NewEstablishmentAddress, NewEstablishmentContact, NewEstablishmentMember,
    NewEstablishmentPhone,
};
use crate::domain::error::DomainError;
use crate::domain::repo::{EstablishmentRepo, UniqueViolation, UnitOfWork};
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::SeaOrmUnitOfWork;

async fn unit_of_work() -> Arc<SeaOrmUnitOfWork> {
    let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default())
        .await
        .unwrap();
    Migrator::up(db.seaorm(), None).await.unwrap();
    Arc::new(SeaOrmUnitOfWork::new(db.sea()))
}

async fn service() -> Service {
    Service::new(unit_of_work().await, ServiceConfig::default())
}

async fn role(svc: &Service, name: &str) -> EmployeeRole {
    svc.create_role(NewEmployeeRole {
        name: name.to_string(),
        description: None,
    })
    .await
    .unwrap()
}

async fn employee(svc: &Service, email: &str, role_id: Uuid) -> Employee {
    svc.create_employee(NewEmployee {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: email.to_string(),
        phone: None,
        role_id,
        is_active: true,
    })
    .await
    .unwrap()
}

fn contact(name: &str, email: &str) -> NewEstablishmentContact {
    NewEstablishmentContact {
        name: name.to_string(),
        email: email.to_string(),
        position: None,
        is_primary: false,
    }
}

fn is_conflict_on(err: &DomainError, expected: &str) -> bool {
    matches!(err, DomainError::Conflict { field, .. } if *field == expected)
}

fn establishment(name: &str) -> NewEstablishment {
    NewEstablishment {
        name: name.to_string(),
        description: None,
        website: None,
        is_active: true,
    }
}

fn address(street: &str, is_primary: bool) -> NewEstablishmentAddress {
    NewEstablishmentAddress {
        street: street.to_string(),
        city: "Springfield".to_string(),
        state: None,
        postal_code: "12345".to_string(),
        country: "US".to_string(),
        is_primary,
    }
}

fn phone(number: &str, is_primary: bool) -> NewEstablishmentPhone {
    NewEstablishmentPhone {
        phone_number: number.to_string(),
        label: None,
        is_primary,
    }
}

fn page() -> PageRequest {
    PageRequest::new(50, 0)
}

#[tokio::test]
#[traced_test]
async fn first_address_becomes_primary() {
    let svc = service().await;
    let est = svc.create_establishment(establishment("Cafe")).await.unwrap();

    let first = svc
        .create_address(est.id, address("1 Main St", false))
        .await
        .unwrap();
    let second = svc
        .create_address(est.id, address("2 Main St", false))
        .await
        .unwrap();

    assert!(first.is_primary);
    assert!(!second.is_primary);
    assert!(logs_contain("Created establishment address"));
}

#[tokio::test]
async fn primary_address_is_exclusive() {
    let svc = service().await;
    let est = svc.create_establishment(establishment("Cafe")).await.unwrap();
    let first = svc
        .create_address(est.id, address("1 Main St", false))
        .await
        .unwrap();
    let second = svc
        .create_address(est.id, address("2 Main St", true))
        .await
        .unwrap();

    assert!(second.is_primary);
    assert!(!svc.get_address(est.id, first.id).await.unwrap().is_primary);

    // Flip back through update.
    svc.update_address(
        est.id,
        first.id,
        EstablishmentAddressPatch {
            is_primary: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let listed = svc.list_addresses(est.id, page()).await.unwrap();
    let primaries: Vec<_> = listed.items.iter().filter(|a| a.is_primary).collect();
    assert_eq!(primaries.len(), 1);
    assert_eq!(primaries[0].id, first.id);
}

#[tokio::test]
async fn deleting_primary_does_not_promote() {
    let svc = service().await;
    let est = svc.create_establishment(establishment("Cafe")).await.unwrap();
    let first = svc
        .create_phone(est.id, phone("+1 555 000 1111", false))
        .await
        .unwrap();
    let second = svc
        .create_phone(est.id, phone("+1 555 000 2222", false))
        .await
        .unwrap();

    svc.delete_phone(est.id, first.id).await.unwrap();

    assert!(!svc.get_phone(est.id, second.id).await.unwrap().is_primary);
}

#[tokio::test]
async fn primary_flags_are_per_establishment() {
    let svc = service().await;
    let a = svc.create_establishment(establishment("A")).await.unwrap();
    let b = svc.create_establishment(establishment("B")).await.unwrap();

    let pa = svc.create_phone(a.id, phone("5550001111", true)).await.unwrap();
    let pb = svc.create_phone(b.id, phone("5550001111", true)).await.unwrap();

    assert!(svc.get_phone(a.id, pa.id).await.unwrap().is_primary);
    assert!(svc.get_phone(b.id, pb.id).await.unwrap().is_primary);
}

#[tokio::test]
async fn phone_numbers_conflict_after_normalization() {
    let svc = service().await;
    let est = svc.create_establishment(establishment("Cafe")).await.unwrap();
    let created = svc
        .create_phone(est.id, phone("+1 (555) 123-4567", false))
        .await
        .unwrap();
    assert_eq!(created.phone_number, "+15551234567");

    let err = svc
        .create_phone(est.id, phone("+1-555-123-4567", false))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { field: "phone_number", .. }), "{err}");

    // Own number is not a conflict.
    svc.update_phone(
        est.id,
        created.id,
        EstablishmentPhonePatch {
            phone_number: Some("+15551234567".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn child_under_other_establishment_is_not_found() {
    let svc = service().await;
    let a = svc.create_establishment(establishment("A")).await.unwrap();
    let b = svc.create_establishment(establishment("B")).await.unwrap();
    let addr = svc
        .create_address(a.id, address("1 Main St", false))
        .await
        .unwrap();

    let err = svc.get_address(b.id, addr.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    let err = svc.delete_address(b.id, addr.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    assert!(svc.get_address(a.id, addr.id).await.is_ok());
}

#[tokio::test]
async fn establishment_names_are_case_insensitive() {
    let svc = service().await;
    let cafe = svc.create_establishment(establishment("Cafe")).await.unwrap();

    let err = svc
        .create_establishment(establishment("  CAFE "))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { field: "name", .. }), "{err}");

    // Renaming to its own name in a different case is fine.
    let renamed = svc
        .update_establishment(
            cafe.id,
            EstablishmentPatch {
                name: Some("CAFE".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "CAFE");
}

#[tokio::test]
async fn update_clears_nullable_fields() {
    let svc = service().await;
    let est = svc
        .create_establishment(NewEstablishment {
            description: Some("Corner cafe".into()),
            website: Some("https://cafe.example.com".into()),
            ..establishment("Cafe")
        })
        .await
        .unwrap();

    let updated = svc
        .update_establishment(
            est.id,
            EstablishmentPatch {
                website: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.website, None);
    assert_eq!(updated.description.as_deref(), Some("Corner cafe"));
    assert!(updated.updated_at >= est.updated_at);
}

#[tokio::test]
async fn invalid_website_is_rejected() {
    let svc = service().await;
    let err = svc
        .create_establishment(NewEstablishment {
            website: Some("ftp://cafe.example.com".into()),
            ..establishment("Cafe")
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "website"));
}

#[tokio::test]
#[traced_test]
async fn deleting_establishment_removes_children() {
    let svc = service().await;
    let role = svc
        .create_role(NewEmployeeRole {
            name: "Manager".into(),
            description: None,
        })
        .await
        .unwrap();
    let emp = svc
        .create_employee(NewEmployee {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: None,
            role_id: role.id,
            is_active: true,
        })
        .await
        .unwrap();
    let est = svc.create_establishment(establishment("Cafe")).await.unwrap();
    let addr = svc
        .create_address(est.id, address("1 Main St", false))
        .await
        .unwrap();
    svc.create_contact(
        est.id,
        NewEstablishmentContact {
            name: "Bob".into(),
            email: "bob@example.com".into(),
            position: None,
            is_primary: false,
        },
    )
    .await
    .unwrap();
    svc.create_member(
        est.id,
        NewEstablishmentMember {
            employee_id: emp.id,
            role_id: role.id,
        },
    )
    .await
    .unwrap();

    svc.delete_establishment(est.id).await.unwrap();

    assert!(matches!(
        svc.get_establishment(est.id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        svc.get_address(est.id, addr.id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(logs_contain("children=3"));

    // The membership is gone, so the employee can be removed now.
    svc.delete_employee(emp.id).await.unwrap();
}

#[tokio::test]
async fn failed_mutation_leaves_no_trace() {
    let svc = service().await;
    let est = svc.create_establishment(establishment("Cafe")).await.unwrap();
    svc.create_address(est.id, address("1 Main St", false))
        .await
        .unwrap();

    // Duplicate key fails after the transaction is open; nothing may change.
    let err = svc
        .create_address(est.id, address("1 Main St", true))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));

    let listed = svc.list_addresses(est.id, page()).await.unwrap();
    assert_eq!(listed.total, 1);
    assert!(listed.items[0].is_primary);
}

#[tokio::test]
async fn role_in_use_cannot_be_deleted() {
    let svc = service().await;
    let role = svc
        .create_role(NewEmployeeRole {
            name: "Chef".into(),
            description: Some("Kitchen".into()),
        })
        .await
        .unwrap();
    let emp = svc
        .create_employee(NewEmployee {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "Ada@Example.com".into(),
            phone: Some("(555) 987-6543".into()),
            role_id: role.id,
            is_active: true,
        })
        .await
        .unwrap();
    assert_eq!(emp.email, "ada@example.com");
    assert!(!emp.has_password);

    let err = svc.delete_role(role.id).await.unwrap_err();
    assert!(matches!(err, DomainError::InUse { .. }), "{err}");

    svc.delete_employee(emp.id).await.unwrap();
    svc.delete_role(role.id).await.unwrap();
}

#[tokio::test]
async fn employee_requires_existing_role() {
    let svc = service().await;
    let err = svc
        .create_employee(NewEmployee {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: None,
            role_id: Uuid::new_v4(),
            is_active: true,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "employee_role", .. }));
}

#[tokio::test]
async fn password_is_hashed_and_flagged() {
    let svc = service().await;
    let role = svc
        .create_role(NewEmployeeRole {
            name: "Chef".into(),
            description: None,
        })
        .await
        .unwrap();
    let emp = svc
        .create_employee(NewEmployee {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: None,
            role_id: role.id,
            is_active: true,
        })
        .await
        .unwrap();

    let err = svc.set_employee_password(emp.id, "short").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    svc.set_employee_password(emp.id, "correct horse")
        .await
        .unwrap();
    assert!(svc.get_employee(emp.id).await.unwrap().has_password);

    let creds = svc
        .find_credentials("ADA@example.com")
        .await
        .unwrap()
        .unwrap();
    let hash = creds.password_hash.unwrap();
    assert_ne!(hash, "correct horse");
    assert!(auth::password::verify_password("correct horse", &hash).unwrap());

    assert!(svc.find_credentials("not an email").await.unwrap().is_none());
}

#[tokio::test]
#[traced_test]
async fn bootstrap_admin_is_idempotent() {
    let svc = service().await;
    let hash = auth::password::hash_password("admin-password").unwrap();

    assert!(svc
        .bootstrap_admin("admin@example.com", "Site", "Admin", &hash)
        .await
        .unwrap());
    assert!(!svc
        .bootstrap_admin("admin@example.com", "Site", "Admin", &hash)
        .await
        .unwrap());

    let admin = svc
        .find_employee_by_email("admin@example.com")
        .await
        .unwrap()
        .unwrap();
    let role = svc.get_role(admin.role_id).await.unwrap();
    assert_eq!(role.name, ADMINISTRATOR_ROLE);
    assert!(admin.is_active && admin.has_password);
    assert!(logs_contain("Administrator already present"));
}

#[tokio::test]
async fn pages_apply_limits_and_totals() {
    let svc = service().await;
    for i in 0..5 {
        svc.create_establishment(establishment(&format!("Shop {i}")))
            .await
            .unwrap();
    }

    let page = svc
        .resolve_page(&PageParams {
            limit: Some(2),
            offset: Some(3),
        })
        .unwrap();
    let listed = svc.list_establishments(page).await.unwrap();
    assert_eq!(listed.total, 5);
    assert_eq!(listed.items.len(), 2);
    assert_eq!(listed.items[0].name, "Shop 3");

    let err = svc
        .resolve_page(&PageParams {
            limit: Some(0),
            offset: None,
        })
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "limit"));

    let capped = svc
        .resolve_page(&PageParams {
            limit: Some(1_000_000),
            offset: None,
        })
        .unwrap();
    assert_eq!(capped.limit, 1000);
}

#[tokio::test]
async fn non_ascii_names_conflict_case_insensitively() {
    let svc = service().await;
    svc.create_establishment(establishment("École")).await.unwrap();

    for dup in ["École", "ÉCOLE", "  école "] {
        let err = svc.create_establishment(establishment(dup)).await.unwrap_err();
        assert!(is_conflict_on(&err, "name"), "{dup}: {err}");
    }

    role(&svc, "Señor Chef").await;
    let err = svc
        .create_role(NewEmployeeRole {
            name: "SEÑOR CHEF".into(),
            description: None,
        })
        .await
        .unwrap_err();
    assert!(is_conflict_on(&err, "name"), "{err}");
}

#[tokio::test]
async fn unique_index_rejection_is_a_conflict() {
    let uow = unit_of_work().await;
    let svc = Service::new(uow.clone(), ServiceConfig::default());
    let existing = svc.create_establishment(establishment("Café")).await.unwrap();

    // A second writer that passed its lookup before the first one committed.
    let late = Establishment {
        id: Uuid::new_v4(),
        name: "CAFÉ".into(),
        ..existing
    };
    let tx = uow.begin().await.unwrap();
    let err = tx.establishment_insert(&late).await.unwrap_err();
    assert!(err.is::<UniqueViolation>(), "{err:#}");

    let mapped = on_duplicate(ESTABLISHMENT, "name", &late.name)(err);
    assert!(is_conflict_on(&mapped, "name"), "{mapped}");
}

#[tokio::test]
async fn employee_emails_are_unique() {
    let svc = service().await;
    let chef = role(&svc, "Chef").await;
    let ada = employee(&svc, "ada@example.com", chef.id).await;
    let bob = employee(&svc, "bob@example.com", chef.id).await;

    let err = svc
        .create_employee(NewEmployee {
            first_name: "Other".into(),
            last_name: "Ada".into(),
            email: " ADA@example.com".into(),
            phone: None,
            role_id: chef.id,
            is_active: true,
        })
        .await
        .unwrap_err();
    assert!(is_conflict_on(&err, "email"), "{err}");

    let err = svc
        .update_employee(
            bob.id,
            EmployeePatch {
                email: Some("ada@example.com".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(is_conflict_on(&err, "email"), "{err}");

    // Re-submitting one's own address is not a conflict.
    let same = svc
        .update_employee(
            ada.id,
            EmployeePatch {
                email: Some("Ada@Example.com".into()),
                last_name: Some("Byron".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(same.email, "ada@example.com");
    assert_eq!(same.last_name, "Byron");
}

#[tokio::test]
async fn contact_emails_are_unique_per_establishment() {
    let svc = service().await;
    let cafe = svc.create_establishment(establishment("Cafe")).await.unwrap();
    let bar = svc.create_establishment(establishment("Bar")).await.unwrap();

    svc.create_contact(cafe.id, contact("Bob", "bob@example.com"))
        .await
        .unwrap();
    let err = svc
        .create_contact(cafe.id, contact("Robert", "BOB@example.com"))
        .await
        .unwrap_err();
    assert!(is_conflict_on(&err, "email"), "{err}");

    // Another establishment may use the same address.
    svc.create_contact(bar.id, contact("Bob", "bob@example.com"))
        .await
        .unwrap();

    let eve = svc
        .create_contact(cafe.id, contact("Eve", "eve@example.com"))
        .await
        .unwrap();
    let err = svc
        .update_contact(
            cafe.id,
            eve.id,
            EstablishmentContactPatch {
                email: Some("bob@example.com".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(is_conflict_on(&err, "email"), "{err}");
}

#[tokio::test]
async fn employee_joins_an_establishment_once() {
    let svc = service().await;
    let cafe = svc.create_establishment(establishment("Cafe")).await.unwrap();
    let chef = role(&svc, "Chef").await;
    let host = role(&svc, "Host").await;
    let ada = employee(&svc, "ada@example.com", chef.id).await;

    svc.create_member(
        cafe.id,
        NewEstablishmentMember {
            employee_id: ada.id,
            role_id: chef.id,
        },
    )
    .await
    .unwrap();
    let err = svc
        .create_member(
            cafe.id,
            NewEstablishmentMember {
                employee_id: ada.id,
                role_id: host.id,
            },
        )
        .await
        .unwrap_err();
    assert!(is_conflict_on(&err, "employee_id"), "{err}");
}

#[tokio::test]
async fn members_require_existing_role() {
    let svc = service().await;
    let cafe = svc.create_establishment(establishment("Cafe")).await.unwrap();
    let chef = role(&svc, "Chef").await;
    let ada = employee(&svc, "ada@example.com", chef.id).await;

    let err = svc
        .create_member(
            cafe.id,
            NewEstablishmentMember {
                employee_id: ada.id,
                role_id: Uuid::new_v4(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "employee_role", .. }), "{err}");

    let member = svc
        .create_member(
            cafe.id,
            NewEstablishmentMember {
                employee_id: ada.id,
                role_id: chef.id,
            },
        )
        .await
        .unwrap();
    let err = svc
        .update_member(
            cafe.id,
            member.id,
            EstablishmentMemberPatch {
                role_id: Some(Uuid::new_v4()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "employee_role", .. }), "{err}");
    assert_eq!(svc.get_member(cafe.id, member.id).await.unwrap().role_id, chef.id);
}

#[tokio::test]
async fn primary_contact_and_phone_are_exclusive_on_update() {
    let svc = service().await;
    let cafe = svc.create_establishment(establishment("Cafe")).await.unwrap();

    let bob = svc
        .create_contact(cafe.id, contact("Bob", "bob@example.com"))
        .await
        .unwrap();
    let eve = svc
        .create_contact(cafe.id, contact("Eve", "eve@example.com"))
        .await
        .unwrap();
    assert!(bob.is_primary && !eve.is_primary);

    let eve = svc
        .update_contact(
            cafe.id,
            eve.id,
            EstablishmentContactPatch {
                is_primary: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(eve.is_primary);
    assert!(!svc.get_contact(cafe.id, bob.id).await.unwrap().is_primary);

    let front = svc
        .create_phone(cafe.id, phone("555-000-1111", false))
        .await
        .unwrap();
    let back = svc
        .create_phone(cafe.id, phone("555-000-2222", false))
        .await
        .unwrap();
    assert!(front.is_primary && !back.is_primary);

    svc.update_phone(
        cafe.id,
        back.id,
        EstablishmentPhonePatch {
            is_primary: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let phones = svc.list_phones(cafe.id, page()).await.unwrap();
    let primaries: Vec<_> = phones.items.iter().filter(|p| p.is_primary).collect();
    assert_eq!(primaries.len(), 1);
    assert_eq!(primaries[0].id, back.id);
}
