mod common;

use common::TestEnv;
use cssite_collect::errors::CollectError;
use cssite_collect::models::accounts::entities::AccountRole;
use cssite_collect::models::accounts::requests::UpdateAccountRequest;
use cssite_collect::models::parsed_files::requests::{
    CreateParsedFileRequest, ParsedFileListQuery, UpdateParsedFileRequest,
};
use cssite_collect::models::participations::requests::{
    CreateParticipationRequest, ParticipationListQuery, UpdateParticipationRequest,
};
use cssite_collect::models::schemas::requests::{
    CreateMappingPairRequest, CreateSchemaAttributeRequest,
};
use cssite_collect::models::tasks::requests::{
    CreateTaskRequest, TaskListQuery, UpdateTaskRequest,
};
use cssite_collect::models::users::requests::CreateIdentityRequest;
use cssite_collect::models::accounts::requests::CreateAccountRequest;
use cssite_collect::models::accounts::entities::Gender;

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

#[tokio::test]
async fn test_task_name_is_unique() {
    let env = TestEnv::new().await;
    env.task("weather", true).await;

    let duplicate = env
        .storage
        .create_task(CreateTaskRequest {
            name: "weather".to_string(),
            minimal_upload_frequency: "weekly".to_string(),
            activation_state: false,
            description: String::new(),
            original_data_description: String::new(),
        })
        .await;
    assert!(matches!(duplicate, Err(CollectError::Conflict(_))));

    // 改名为已存在的名称同样冲突
    let other = env.task("traffic", false).await;
    let renamed = env
        .storage
        .update_task(
            other.id,
            UpdateTaskRequest {
                name: Some("weather".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(renamed, Err(CollectError::Conflict(_))));
}

#[tokio::test]
async fn test_task_name_length_is_checked() {
    let env = TestEnv::new().await;
    let result = env
        .storage
        .create_task(CreateTaskRequest {
            name: "x".repeat(46),
            minimal_upload_frequency: String::new(),
            activation_state: false,
            description: String::new(),
            original_data_description: String::new(),
        })
        .await;
    assert!(matches!(result, Err(CollectError::Validation(_))));
}

#[tokio::test]
async fn test_task_search_escapes_wildcards() {
    let env = TestEnv::new().await;
    env.task("100%_done", true).await;
    env.task("100 days", false).await;

    let found = env
        .storage
        .list_tasks(TaskListQuery {
            search: Some("100%".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "100%_done");

    let active = env
        .storage
        .list_tasks(TaskListQuery {
            activation_state: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].to_string(), "100%_done");
}

#[tokio::test]
async fn test_one_account_per_identity() {
    let env = TestEnv::new().await;
    let account = env.account("alice", AccountRole::Submitter).await;
    assert_eq!(account.to_string(), "alice");

    let second = env
        .storage
        .create_account(CreateAccountRequest {
            user_id: account.user_id,
            name: "alice again".to_string(),
            contact: String::new(),
            birth: None,
            gender: Gender::Male,
            address: String::new(),
            role: AccountRole::Grader,
        })
        .await;
    assert!(matches!(second, Err(CollectError::Conflict(_))));

    let missing = env
        .storage
        .create_account(CreateAccountRequest {
            user_id: 9999,
            name: "ghost".to_string(),
            contact: String::new(),
            birth: None,
            gender: Gender::Male,
            address: String::new(),
            role: AccountRole::Submitter,
        })
        .await;
    assert!(matches!(missing, Err(CollectError::NotFound(_))));
}

#[tokio::test]
async fn test_account_update_keeps_closed_enums() {
    let env = TestEnv::new().await;
    let account = env.account("bob", AccountRole::Submitter).await;

    let updated = env
        .storage
        .update_account(
            account.id,
            UpdateAccountRequest {
                role: Some(AccountRole::Grader),
                gender: Some(Gender::Male),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.role, AccountRole::Grader);
    assert_eq!(updated.gender, Gender::Male);
    assert!(updated.can_grade());
    assert_eq!(updated.username, "bob");

    let too_long = env
        .storage
        .update_account(
            account.id,
            UpdateAccountRequest {
                contact: Some("0".repeat(21)),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(too_long, Err(CollectError::Validation(_))));
}

#[tokio::test]
async fn test_participation_is_unique_per_account_and_task() {
    let env = TestEnv::new().await;
    let alice = env.account("alice", AccountRole::Submitter).await;
    let task = env.task("weather", true).await;
    let participation = env.participate(&alice, &task, true).await;
    assert_eq!(participation.submit_count, 0);

    let duplicate = env
        .storage
        .create_participation(CreateParticipationRequest {
            account_id: alice.id,
            task_id: task.id,
            admission: false,
        })
        .await;
    assert!(matches!(duplicate, Err(CollectError::Conflict(_))));

    let all = env
        .storage
        .list_participations(ParticipationListQuery {
            task_id: Some(task.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_submit_count_cannot_be_negative() {
    let env = TestEnv::new().await;
    let alice = env.account("alice", AccountRole::Submitter).await;
    let task = env.task("weather", true).await;
    let participation = env.participate(&alice, &task, true).await;

    let result = env
        .storage
        .update_participation(
            participation.id,
            UpdateParticipationRequest {
                submit_count: Some(-1),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(CollectError::Validation(_))));
}

#[tokio::test]
async fn test_participation_label() {
    let env = TestEnv::new().await;
    let alice = env.account("alice", AccountRole::Submitter).await;
    let task = env.task("weather", true).await;
    let participation = env.participate(&alice, &task, false).await;

    let label = env
        .storage
        .get_participation_label(participation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(label.to_string(), "\"alice\" parts in \"weather\"");
}

#[tokio::test]
async fn test_mapping_pair_label() {
    let env = TestEnv::new().await;
    let task = env.task("weather", true).await;
    let attribute = env
        .storage
        .create_schema_attribute(CreateSchemaAttributeRequest {
            task_id: task.id,
            attr: "temperature".to_string(),
        })
        .await
        .unwrap();
    let mapping = env.mapping(&task, "station_v2").await;

    let pair = env
        .storage
        .create_mapping_pair(CreateMappingPairRequest {
            mapping_info_id: mapping.id,
            schema_attribute_id: attribute.id,
            parsing_column_name: "temp_c".to_string(),
        })
        .await
        .unwrap();

    let label = env
        .storage
        .get_mapping_pair_label(pair.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(label.mapping, "station_v2");
    assert_eq!(label.master, "temperature");
    assert_eq!(label.derived, "temp_c");
    assert_eq!(
        label.to_string(),
        "{'station_v2': {'master': 'temperature', 'derived': 'temp_c'}}"
    );
    assert_eq!(
        serde_json::to_value(&label).unwrap(),
        serde_json::json!({"station_v2": {"master": "temperature", "derived": "temp_c"}})
    );
}

#[tokio::test]
async fn test_mapping_pair_must_stay_within_one_task() {
    let env = TestEnv::new().await;
    let weather = env.task("weather", true).await;
    let traffic = env.task("traffic", true).await;
    let attribute = env
        .storage
        .create_schema_attribute(CreateSchemaAttributeRequest {
            task_id: weather.id,
            attr: "temperature".to_string(),
        })
        .await
        .unwrap();
    let mapping = env.mapping(&traffic, "sensor_log").await;

    let result = env
        .storage
        .create_mapping_pair(CreateMappingPairRequest {
            mapping_info_id: mapping.id,
            schema_attribute_id: attribute.id,
            parsing_column_name: "temp".to_string(),
        })
        .await;
    assert!(matches!(result, Err(CollectError::Validation(_))));
}

#[tokio::test]
async fn test_grading_score_out_of_range_is_not_saved() {
    let env = TestEnv::new().await;
    let alice = env.account("alice", AccountRole::Submitter).await;
    let task = env.task("weather", true).await;
    let mapping = env.mapping(&task, "station_v2").await;

    let base = CreateParsedFileRequest {
        submitter_id: alice.id,
        task_id: task.id,
        derived_schema_id: mapping.id,
        ..Default::default()
    };

    for score in [11, -1] {
        let result = env
            .storage
            .create_parsed_file(CreateParsedFileRequest {
                grading_score: Some(score),
                ..base.clone()
            })
            .await;
        assert!(matches!(result, Err(CollectError::Validation(_))));
    }
    let saved = env
        .storage
        .list_parsed_files(ParsedFileListQuery::default())
        .await
        .unwrap();
    assert!(saved.is_empty());

    for score in [0, 10] {
        let file = env
            .storage
            .create_parsed_file(CreateParsedFileRequest {
                grading_score: Some(score),
                ..base.clone()
            })
            .await
            .unwrap();
        assert_eq!(file.grading_score, Some(score));
    }

    // 更新时同样校验
    let file = env
        .storage
        .create_parsed_file(base.clone())
        .await
        .unwrap();
    let result = env
        .storage
        .update_parsed_file(
            file.id,
            UpdateParsedFileRequest {
                grading_score: Some(11),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(CollectError::Validation(_))));
    let reloaded = env
        .storage
        .get_parsed_file_by_id(file.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.grading_score, None);
}

#[tokio::test]
async fn test_grade_date_is_set_on_every_save() {
    let env = TestEnv::new().await;
    let alice = env.account("alice", AccountRole::Submitter).await;
    let task = env.task("weather", true).await;
    let mapping = env.mapping(&task, "station_v2").await;

    let file = env
        .storage
        .create_parsed_file(CreateParsedFileRequest {
            submitter_id: alice.id,
            task_id: task.id,
            derived_schema_id: mapping.id,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(file.grade_date, today());

    let updated = env
        .storage
        .update_parsed_file(
            file.id,
            UpdateParsedFileRequest {
                start_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.grade_date, today());
}

#[tokio::test]
async fn test_deleting_submitter_cascades_and_grader_is_nulled() {
    let env = TestEnv::new().await;
    let alice = env.account("alice", AccountRole::Submitter).await;
    let carol = env.account("carol", AccountRole::Grader).await;
    let task = env.task("weather", true).await;
    let mapping = env.mapping(&task, "station_v2").await;
    env.participate(&alice, &task, true).await;

    let file = env
        .storage
        .create_parsed_file(CreateParsedFileRequest {
            submitter_id: alice.id,
            grader_id: Some(carol.id),
            task_id: task.id,
            derived_schema_id: mapping.id,
            grading_score: Some(7),
            pass_state: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();

    // 删除评分者：记录保留，评分者置空
    assert!(env.storage.delete_account(carol.id).await.unwrap());
    let kept = env
        .storage
        .get_parsed_file_by_id(file.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.grader_id, None);
    assert_eq!(kept.grading_score, Some(7));

    // 删除提交者：参与记录与提交记录一起删除
    assert!(env.storage.delete_account(alice.id).await.unwrap());
    assert!(env.storage.get_parsed_file_by_id(file.id).await.unwrap().is_none());
    assert!(env.storage.get_participation(alice.id, task.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_deleting_identity_removes_account() {
    let env = TestEnv::new().await;
    let identity = env
        .storage
        .create_identity(CreateIdentityRequest {
            username: "dave".to_string(),
            email: "dave@example.com".to_string(),
        })
        .await
        .unwrap();
    let account = env
        .storage
        .create_account(CreateAccountRequest {
            user_id: identity.id,
            name: "Dave".to_string(),
            contact: String::new(),
            birth: chrono::NaiveDate::from_ymd_opt(1990, 3, 4),
            gender: Gender::Male,
            address: String::new(),
            role: AccountRole::Administrator,
        })
        .await
        .unwrap();

    assert!(env.storage.delete_identity(identity.id).await.unwrap());
    assert!(env.storage.get_account_by_id(account.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_deleting_task_cascades() {
    let env = TestEnv::new().await;
    let alice = env.account("alice", AccountRole::Submitter).await;
    let task = env.task("weather", true).await;
    let mapping = env.mapping(&task, "station_v2").await;
    let attribute = env
        .storage
        .create_schema_attribute(CreateSchemaAttributeRequest {
            task_id: task.id,
            attr: "temperature".to_string(),
        })
        .await
        .unwrap();
    env.participate(&alice, &task, true).await;

    assert!(env.storage.delete_task(task.id).await.unwrap());
    assert!(env.storage.get_mapping_info_by_id(mapping.id).await.unwrap().is_none());
    assert!(
        env.storage
            .get_schema_attribute_by_id(attribute.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(env.storage.get_participation(alice.id, task.id).await.unwrap().is_none());
}
