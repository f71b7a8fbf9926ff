use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum SocialMediaPlatforms {
    Table,
    Id,
    Name,
    NameKey,
    BaseUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EmployeeRoles {
    Table,
    Id,
    Name,
    NameKey,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    RoleId,
    IsActive,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Establishments {
    Table,
    Id,
    Name,
    NameKey,
    Description,
    Website,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EstablishmentAddresses {
    Table,
    Id,
    EstablishmentId,
    Street,
    City,
    State,
    PostalCode,
    Country,
    MatchKey,
    IsPrimary,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EstablishmentContacts {
    Table,
    Id,
    EstablishmentId,
    Name,
    Email,
    Position,
    IsPrimary,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EstablishmentPhones {
    Table,
    Id,
    EstablishmentId,
    PhoneNumber,
    Label,
    IsPrimary,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EstablishmentMembers {
    Table,
    Id,
    EstablishmentId,
    EmployeeId,
    RoleId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EstablishmentSocialMedia {
    Table,
    Id,
    EstablishmentId,
    PlatformId,
    Handle,
    CreatedAt,
    UpdatedAt,
}

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).uuid().not_null().primary_key().to_owned()
}

fn ts_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

fn fk_establishment<T: IntoIden + 'static>(name: &str, table: T, col: T) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from(table, col)
        .to(Establishments::Table, Establishments::Id)
        .on_delete(ForeignKeyAction::Cascade)
        .to_owned()
}

fn unique_index<T: IntoIden + 'static>(name: &str, table: T, cols: Vec<T>) -> IndexCreateStatement {
    let mut idx = Index::create();
    idx.name(name).table(table).unique();
    for c in cols {
        idx.col(c);
    }
    idx.to_owned()
}

fn index<T: IntoIden + 'static>(name: &str, table: T, col: T) -> IndexCreateStatement {
    Index::create().name(name).table(table).col(col).to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SocialMediaPlatforms::Table)
                    .if_not_exists()
                    .col(id_col(SocialMediaPlatforms::Id))
                    .col(ColumnDef::new(SocialMediaPlatforms::Name).string().not_null())
                    .col(ColumnDef::new(SocialMediaPlatforms::NameKey).string().not_null())
                    .col(ColumnDef::new(SocialMediaPlatforms::BaseUrl).string().null())
                    .col(ts_col(SocialMediaPlatforms::CreatedAt))
                    .col(ts_col(SocialMediaPlatforms::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(unique_index(
                "ux_social_media_platforms_name",
                SocialMediaPlatforms::Table,
                vec![SocialMediaPlatforms::NameKey],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EmployeeRoles::Table)
                    .if_not_exists()
                    .col(id_col(EmployeeRoles::Id))
                    .col(ColumnDef::new(EmployeeRoles::Name).string().not_null())
                    .col(ColumnDef::new(EmployeeRoles::NameKey).string().not_null())
                    .col(ColumnDef::new(EmployeeRoles::Description).text().null())
                    .col(ts_col(EmployeeRoles::CreatedAt))
                    .col(ts_col(EmployeeRoles::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(unique_index(
                "ux_employee_roles_name",
                EmployeeRoles::Table,
                vec![EmployeeRoles::NameKey],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(id_col(Employees::Id))
                    .col(ColumnDef::new(Employees::FirstName).string().not_null())
                    .col(ColumnDef::new(Employees::LastName).string().not_null())
                    .col(ColumnDef::new(Employees::Email).string().not_null())
                    .col(ColumnDef::new(Employees::Phone).string().null())
                    .col(ColumnDef::new(Employees::RoleId).uuid().not_null())
                    .col(
                        ColumnDef::new(Employees::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Employees::PasswordHash).string().null())
                    .col(ts_col(Employees::CreatedAt))
                    .col(ts_col(Employees::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_role")
                            .from(Employees::Table, Employees::RoleId)
                            .to(EmployeeRoles::Table, EmployeeRoles::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(unique_index(
                "ux_employees_email",
                Employees::Table,
                vec![Employees::Email],
            ))
            .await?;
        manager
            .create_index(index("ix_employees_role_id", Employees::Table, Employees::RoleId))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Establishments::Table)
                    .if_not_exists()
                    .col(id_col(Establishments::Id))
                    .col(ColumnDef::new(Establishments::Name).string().not_null())
                    .col(ColumnDef::new(Establishments::NameKey).string().not_null())
                    .col(ColumnDef::new(Establishments::Description).text().null())
                    .col(ColumnDef::new(Establishments::Website).string().null())
                    .col(
                        ColumnDef::new(Establishments::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ts_col(Establishments::CreatedAt))
                    .col(ts_col(Establishments::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(unique_index(
                "ux_establishments_name",
                Establishments::Table,
                vec![Establishments::NameKey],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EstablishmentAddresses::Table)
                    .if_not_exists()
                    .col(id_col(EstablishmentAddresses::Id))
                    .col(
                        ColumnDef::new(EstablishmentAddresses::EstablishmentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EstablishmentAddresses::Street).string().not_null())
                    .col(ColumnDef::new(EstablishmentAddresses::City).string().not_null())
                    .col(ColumnDef::new(EstablishmentAddresses::State).string().null())
                    .col(ColumnDef::new(EstablishmentAddresses::PostalCode).string().not_null())
                    .col(ColumnDef::new(EstablishmentAddresses::Country).string().not_null())
                    .col(ColumnDef::new(EstablishmentAddresses::MatchKey).string().not_null())
                    .col(
                        ColumnDef::new(EstablishmentAddresses::IsPrimary)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ts_col(EstablishmentAddresses::CreatedAt))
                    .col(ts_col(EstablishmentAddresses::UpdatedAt))
                    .foreign_key(&mut fk_establishment(
                        "fk_establishment_addresses_establishment",
                        EstablishmentAddresses::Table,
                        EstablishmentAddresses::EstablishmentId,
                    ))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(unique_index(
                "ux_establishment_addresses_key",
                EstablishmentAddresses::Table,
                vec![
                    EstablishmentAddresses::EstablishmentId,
                    EstablishmentAddresses::MatchKey,
                ],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EstablishmentContacts::Table)
                    .if_not_exists()
                    .col(id_col(EstablishmentContacts::Id))
                    .col(
                        ColumnDef::new(EstablishmentContacts::EstablishmentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EstablishmentContacts::Name).string().not_null())
                    .col(ColumnDef::new(EstablishmentContacts::Email).string().not_null())
                    .col(ColumnDef::new(EstablishmentContacts::Position).string().null())
                    .col(
                        ColumnDef::new(EstablishmentContacts::IsPrimary)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ts_col(EstablishmentContacts::CreatedAt))
                    .col(ts_col(EstablishmentContacts::UpdatedAt))
                    .foreign_key(&mut fk_establishment(
                        "fk_establishment_contacts_establishment",
                        EstablishmentContacts::Table,
                        EstablishmentContacts::EstablishmentId,
                    ))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(unique_index(
                "ux_establishment_contacts_email",
                EstablishmentContacts::Table,
                vec![
                    EstablishmentContacts::EstablishmentId,
                    EstablishmentContacts::Email,
                ],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EstablishmentPhones::Table)
                    .if_not_exists()
                    .col(id_col(EstablishmentPhones::Id))
                    .col(
                        ColumnDef::new(EstablishmentPhones::EstablishmentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EstablishmentPhones::PhoneNumber).string().not_null())
                    .col(ColumnDef::new(EstablishmentPhones::Label).string().null())
                    .col(
                        ColumnDef::new(EstablishmentPhones::IsPrimary)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ts_col(EstablishmentPhones::CreatedAt))
                    .col(ts_col(EstablishmentPhones::UpdatedAt))
                    .foreign_key(&mut fk_establishment(
                        "fk_establishment_phones_establishment",
                        EstablishmentPhones::Table,
                        EstablishmentPhones::EstablishmentId,
                    ))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(unique_index(
                "ux_establishment_phones_number",
                EstablishmentPhones::Table,
                vec![
                    EstablishmentPhones::EstablishmentId,
                    EstablishmentPhones::PhoneNumber,
                ],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EstablishmentMembers::Table)
                    .if_not_exists()
                    .col(id_col(EstablishmentMembers::Id))
                    .col(
                        ColumnDef::new(EstablishmentMembers::EstablishmentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EstablishmentMembers::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(EstablishmentMembers::RoleId).uuid().not_null())
                    .col(ts_col(EstablishmentMembers::CreatedAt))
                    .col(ts_col(EstablishmentMembers::UpdatedAt))
                    .foreign_key(&mut fk_establishment(
                        "fk_establishment_members_establishment",
                        EstablishmentMembers::Table,
                        EstablishmentMembers::EstablishmentId,
                    ))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_establishment_members_employee")
                            .from(EstablishmentMembers::Table, EstablishmentMembers::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_establishment_members_role")
                            .from(EstablishmentMembers::Table, EstablishmentMembers::RoleId)
                            .to(EmployeeRoles::Table, EmployeeRoles::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(unique_index(
                "ux_establishment_members_employee",
                EstablishmentMembers::Table,
                vec![
                    EstablishmentMembers::EstablishmentId,
                    EstablishmentMembers::EmployeeId,
                ],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EstablishmentSocialMedia::Table)
                    .if_not_exists()
                    .col(id_col(EstablishmentSocialMedia::Id))
                    .col(
                        ColumnDef::new(EstablishmentSocialMedia::EstablishmentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EstablishmentSocialMedia::PlatformId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EstablishmentSocialMedia::Handle).string().not_null())
                    .col(ts_col(EstablishmentSocialMedia::CreatedAt))
                    .col(ts_col(EstablishmentSocialMedia::UpdatedAt))
                    .foreign_key(&mut fk_establishment(
                        "fk_establishment_social_media_establishment",
                        EstablishmentSocialMedia::Table,
                        EstablishmentSocialMedia::EstablishmentId,
                    ))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_establishment_social_media_platform")
                            .from(
                                EstablishmentSocialMedia::Table,
                                EstablishmentSocialMedia::PlatformId,
                            )
                            .to(SocialMediaPlatforms::Table, SocialMediaPlatforms::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(unique_index(
                "ux_establishment_social_media_platform",
                EstablishmentSocialMedia::Table,
                vec![
                    EstablishmentSocialMedia::EstablishmentId,
                    EstablishmentSocialMedia::PlatformId,
                ],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children before parents.
        manager
            .drop_table(Table::drop().table(EstablishmentSocialMedia::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EstablishmentMembers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EstablishmentPhones::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EstablishmentContacts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EstablishmentAddresses::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Establishments::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EmployeeRoles::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SocialMediaPlatforms::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
