use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建身份表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建账户表（与身份一对一）
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Accounts::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Accounts::Name).string_len(20).not_null())
                    .col(ColumnDef::new(Accounts::Contact).string_len(20).not_null())
                    .col(ColumnDef::new(Accounts::Birth).date().null())
                    .col(ColumnDef::new(Accounts::Gender).string_len(10).not_null())
                    .col(ColumnDef::new(Accounts::Address).string_len(100).not_null())
                    .col(ColumnDef::new(Accounts::Role).string_len(20).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Accounts::Table, Accounts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建任务表
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tasks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Tasks::Name)
                            .string_len(45)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Tasks::MinimalUploadFrequency)
                            .string_len(45)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tasks::ActivationState)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Tasks::Description).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Tasks::OriginalDataDescription)
                            .string_len(100)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建参与记录表
        manager
            .create_table(
                Table::create()
                    .table(Participations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Participations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Participations::AccountId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Participations::TaskId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Participations::Admission)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Participations::SubmitCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Participations::Table, Participations::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Participations::Table, Participations::TaskId)
                            .to(Tasks::Table, Tasks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建主 schema 属性表
        manager
            .create_table(
                Table::create()
                    .table(SchemaAttributes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SchemaAttributes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SchemaAttributes::TaskId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SchemaAttributes::Attr).string_len(45).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(SchemaAttributes::Table, SchemaAttributes::TaskId)
                            .to(Tasks::Table, Tasks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建派生 schema 表
        manager
            .create_table(
                Table::create()
                    .table(MappingInfos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MappingInfos::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MappingInfos::TaskId).big_integer().not_null())
                    .col(
                        ColumnDef::new(MappingInfos::DerivedSchemaName)
                            .string_len(45)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MappingInfos::Table, MappingInfos::TaskId)
                            .to(Tasks::Table, Tasks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建映射对表
        manager
            .create_table(
                Table::create()
                    .table(MappingPairs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MappingPairs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MappingPairs::MappingInfoId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MappingPairs::SchemaAttributeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MappingPairs::ParsingColumnName)
                            .string_len(45)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MappingPairs::Table, MappingPairs::MappingInfoId)
                            .to(MappingInfos::Table, MappingInfos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MappingPairs::Table, MappingPairs::SchemaAttributeId)
                            .to(SchemaAttributes::Table, SchemaAttributes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建解析文件表
        manager
            .create_table(
                Table::create()
                    .table(ParsedFiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParsedFiles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ParsedFiles::SubmitterId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ParsedFiles::GraderId).big_integer().null())
                    .col(ColumnDef::new(ParsedFiles::TaskId).big_integer().not_null())
                    .col(ColumnDef::new(ParsedFiles::SubmitNumber).integer().null())
                    .col(ColumnDef::new(ParsedFiles::StartDate).date().null())
                    .col(ColumnDef::new(ParsedFiles::EndDate).date().null())
                    .col(ColumnDef::new(ParsedFiles::TotalTuple).integer().null())
                    .col(ColumnDef::new(ParsedFiles::DuplicatedTuple).integer().null())
                    .col(ColumnDef::new(ParsedFiles::NullRatio).double().null())
                    .col(ColumnDef::new(ParsedFiles::GradingScore).integer().null())
                    .col(ColumnDef::new(ParsedFiles::PassState).boolean().null())
                    .col(ColumnDef::new(ParsedFiles::GradingEndDate).date().null())
                    .col(ColumnDef::new(ParsedFiles::GradeDate).date().not_null())
                    .col(
                        ColumnDef::new(ParsedFiles::DerivedSchemaId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ParsedFiles::FileOriginal).string().null())
                    .col(ColumnDef::new(ParsedFiles::FileParsed).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ParsedFiles::Table, ParsedFiles::SubmitterId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ParsedFiles::Table, ParsedFiles::GraderId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ParsedFiles::Table, ParsedFiles::TaskId)
                            .to(Tasks::Table, Tasks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ParsedFiles::Table, ParsedFiles::DerivedSchemaId)
                            .to(MappingInfos::Table, MappingInfos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 索引 ====================

        // 每个账户在每个任务中至多一条参与记录
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_participations_account_task")
                    .table(Participations::Table)
                    .col(Participations::AccountId)
                    .col(Participations::TaskId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_participations_task_id")
                    .table(Participations::Table)
                    .col(Participations::TaskId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_schema_attributes_task_id")
                    .table(SchemaAttributes::Table)
                    .col(SchemaAttributes::TaskId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_mapping_infos_task_id")
                    .table(MappingInfos::Table)
                    .col(MappingInfos::TaskId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_mapping_pairs_mapping_info_id")
                    .table(MappingPairs::Table)
                    .col(MappingPairs::MappingInfoId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_parsed_files_submitter_task")
                    .table(ParsedFiles::Table)
                    .col(ParsedFiles::SubmitterId)
                    .col(ParsedFiles::TaskId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_parsed_files_grader_id")
                    .table(ParsedFiles::Table)
                    .col(ParsedFiles::GraderId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(ParsedFiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MappingPairs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MappingInfos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SchemaAttributes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Participations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Accounts {
    #[sea_orm(iden = "accounts")]
    Table,
    Id,
    UserId,
    Name,
    Contact,
    Birth,
    Gender,
    Address,
    Role,
}

#[derive(DeriveIden)]
enum Tasks {
    #[sea_orm(iden = "tasks")]
    Table,
    Id,
    Name,
    MinimalUploadFrequency,
    ActivationState,
    Description,
    OriginalDataDescription,
}

#[derive(DeriveIden)]
enum Participations {
    #[sea_orm(iden = "participations")]
    Table,
    Id,
    AccountId,
    TaskId,
    Admission,
    SubmitCount,
}

#[derive(DeriveIden)]
enum SchemaAttributes {
    #[sea_orm(iden = "schema_attributes")]
    Table,
    Id,
    TaskId,
    Attr,
}

#[derive(DeriveIden)]
enum MappingInfos {
    #[sea_orm(iden = "mapping_infos")]
    Table,
    Id,
    TaskId,
    DerivedSchemaName,
}

#[derive(DeriveIden)]
enum MappingPairs {
    #[sea_orm(iden = "mapping_pairs")]
    Table,
    Id,
    MappingInfoId,
    SchemaAttributeId,
    ParsingColumnName,
}

#[derive(DeriveIden)]
enum ParsedFiles {
    #[sea_orm(iden = "parsed_files")]
    Table,
    Id,
    SubmitterId,
    GraderId,
    TaskId,
    SubmitNumber,
    StartDate,
    EndDate,
    TotalTuple,
    DuplicatedTuple,
    NullRatio,
    GradingScore,
    PassState,
    GradingEndDate,
    GradeDate,
    DerivedSchemaId,
    FileOriginal,
    FileParsed,
}
