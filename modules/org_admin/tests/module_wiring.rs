use std::sync::Arc;

use auth::contract::{AdminSeed, CredentialStore};
use modkit::api::PageRequest;
use modkit::{ClientHub, DbModule, Module, ModuleCtxBuilder, RestfulModule};
use modkit_db::{ConnectOpts, DbHandle};
use org_admin::contract::{OrgAdminApi, OrgAdminError};
use org_admin::{OrgAdminModule, MODULE_NAME};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

async fn init_module() -> (OrgAdminModule, Arc<ClientHub>) {
    let db = Arc::new(
        DbHandle::connect("sqlite::memory:", ConnectOpts::default())
            .await
            .unwrap(),
    );
    let hub = Arc::new(ClientHub::default());
    let ctx = ModuleCtxBuilder::new(CancellationToken::new())
        .with_db(db.clone())
        .with_client_hub(hub.clone())
        .build()
        .for_module(MODULE_NAME);

    let module = OrgAdminModule::default();
    module.init(&ctx).await.unwrap();
    module.migrate(&db).await.unwrap();
    (module, hub)
}

#[tokio::test]
async fn init_requires_database() {
    let ctx = ModuleCtxBuilder::new(CancellationToken::new())
        .build()
        .for_module(MODULE_NAME);
    let err = OrgAdminModule::default().init(&ctx).await.unwrap_err();
    assert!(err.to_string().contains("requires a database"), "{err:#}");
}

#[tokio::test]
async fn publishes_clients_to_hub() {
    let (module, hub) = init_module().await;
    assert!(module.openapi().is_some());

    let store = hub.get::<dyn CredentialStore>().unwrap();
    let created = store
        .ensure_admin(AdminSeed {
            email: "Root@Example.com".into(),
            first_name: "Root".into(),
            last_name: "User".into(),
            password_hash: auth::password::hash_password("bootstrap-pass").unwrap(),
        })
        .await
        .unwrap();
    assert!(created);

    let creds = store
        .find_by_email("root@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(creds.is_active);
    assert!(creds.password_hash.is_some());

    let api = hub.get::<dyn OrgAdminApi>().unwrap();
    let employee = api
        .find_employee_by_email("ROOT@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(employee.id, creds.subject);
    let role = api.get_employee_role(employee.role_id).await.unwrap();
    assert_eq!(role.name, "Administrator");

    let page = api
        .list_establishments(PageRequest::new(10, 0))
        .await
        .unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn client_errors_carry_contract_error() {
    let (_module, hub) = init_module().await;
    let api = hub.get::<dyn OrgAdminApi>().unwrap();

    let err = api.get_establishment(Uuid::new_v4()).await.unwrap_err();
    match err.downcast_ref::<OrgAdminError>() {
        Some(OrgAdminError::NotFound { entity, .. }) => assert_eq!(*entity, "establishment"),
        other => panic!("unexpected error: {other:?}"),
    }
}
