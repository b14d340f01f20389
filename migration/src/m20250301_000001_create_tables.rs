use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表（管理员 / 负责人）
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
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::InchargeCategory).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Students::RollNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(ColumnDef::new(Students::Email).string().null())
                    .col(ColumnDef::new(Students::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建反馈活动表
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::Title).string().not_null())
                    .col(ColumnDef::new(Events::Description).text().null())
                    .col(ColumnDef::new(Events::WarningMessage).text().null())
                    .col(
                        ColumnDef::new(Events::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Events::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Events::IsOpenToAll)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Events::StartRollNumber).string().null())
                    .col(ColumnDef::new(Events::EndRollNumber).string().null())
                    .col(ColumnDef::new(Events::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Courses::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建活动课程关联表
        manager
            .create_table(
                Table::create()
                    .table(EventCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventCourses::EventId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventCourses::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(EventCourses::EventId)
                            .col(EventCourses::CourseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EventCourses::Table, EventCourses::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EventCourses::Table, EventCourses::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建教师表
        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Staff::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Staff::Name).string().not_null())
                    .col(ColumnDef::new(Staff::CourseId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Staff::Table, Staff::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建问卷题目表
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Questions::Text).text().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建反馈记录表
        manager
            .create_table(
                Table::create()
                    .table(FeedbackResponses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeedbackResponses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FeedbackResponses::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeedbackResponses::EventId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeedbackResponses::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeedbackResponses::StaffId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeedbackResponses::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FeedbackResponses::Table, FeedbackResponses::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FeedbackResponses::Table, FeedbackResponses::EventId)
                            .to(Events::Table, Events::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FeedbackResponses::Table, FeedbackResponses::CourseId)
                            .to(Courses::Table, Courses::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FeedbackResponses::Table, FeedbackResponses::StaffId)
                            .to(Staff::Table, Staff::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一学生对同一活动的同一课程只允许一条反馈记录，
        // 并发的重复提交会在这里冲突回滚
        manager
            .create_index(
                Index::create()
                    .name("idx_feedback_student_event_course")
                    .table(FeedbackResponses::Table)
                    .col(FeedbackResponses::StudentId)
                    .col(FeedbackResponses::EventId)
                    .col(FeedbackResponses::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_feedback_staff_event")
                    .table(FeedbackResponses::Table)
                    .col(FeedbackResponses::StaffId)
                    .col(FeedbackResponses::EventId)
                    .to_owned(),
            )
            .await?;

        // 创建题目评分表
        manager
            .create_table(
                Table::create()
                    .table(QuestionResponses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuestionResponses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(QuestionResponses::FeedbackId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuestionResponses::QuestionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuestionResponses::Rating)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(QuestionResponses::Table, QuestionResponses::FeedbackId)
                            .to(FeedbackResponses::Table, FeedbackResponses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(QuestionResponses::Table, QuestionResponses::QuestionId)
                            .to(Questions::Table, Questions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建通用意见反馈表
        manager
            .create_table(
                Table::create()
                    .table(GeneralFeedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GeneralFeedback::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GeneralFeedback::Category).string().not_null())
                    .col(ColumnDef::new(GeneralFeedback::Content).text().not_null())
                    .col(
                        ColumnDef::new(GeneralFeedback::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneralFeedback::IsResolved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(GeneralFeedback::AdminResponse).text().null())
                    .col(
                        ColumnDef::new(GeneralFeedback::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GeneralFeedback::Table, GeneralFeedback::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GeneralFeedback::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuestionResponses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeedbackResponses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Staff::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EventCourses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    Role,
    InchargeCategory,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
    RollNumber,
    Name,
    Email,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    Title,
    Description,
    WarningMessage,
    IsActive,
    IsDeleted,
    IsOpenToAll,
    StartRollNumber,
    EndRollNumber,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
    Code,
    Name,
}

#[derive(DeriveIden)]
enum EventCourses {
    Table,
    EventId,
    CourseId,
}

#[derive(DeriveIden)]
enum Staff {
    Table,
    Id,
    Name,
    CourseId,
}

#[derive(DeriveIden)]
enum Questions {
    Table,
    Id,
    Text,
}

#[derive(DeriveIden)]
enum FeedbackResponses {
    Table,
    Id,
    StudentId,
    EventId,
    CourseId,
    StaffId,
    SubmittedAt,
}

#[derive(DeriveIden)]
enum QuestionResponses {
    Table,
    Id,
    FeedbackId,
    QuestionId,
    Rating,
}

#[derive(DeriveIden)]
enum GeneralFeedback {
    Table,
    Id,
    Category,
    Content,
    StudentId,
    IsResolved,
    AdminResponse,
    CreatedAt,
}
