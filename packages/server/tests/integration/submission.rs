use std::collections::BTreeSet;

use chrono::{Duration, Utc};
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};
use serde_json::json;

use admission_server::admission::SessionCapabilities;
use admission_server::config::SubmissionConfig;
use admission_server::entity::{custom_input, solution, source_code, source_code_user};

use crate::common::{TestApp, routes};

async fn row_counts(app: &TestApp) -> (u64, u64, u64, u64) {
    (
        solution::Entity::find().count(&app.db).await.unwrap(),
        source_code_user::Entity::find().count(&app.db).await.unwrap(),
        source_code::Entity::find().count(&app.db).await.unwrap(),
        custom_input::Entity::find().count(&app.db).await.unwrap(),
    )
}

mod standalone {
    use super::*;

    #[tokio::test]
    async fn public_problem_is_recorded() {
        let app = TestApp::spawn().await;
        app.seed_problem(42, false).await;
        let token = app.visitor_token(5);

        let res = app
            .submit_with_headers(
                &json!({
                    "type": "problem",
                    "id": 42,
                    "language": 1,
                    "source": "int main() {}",
                    "fingerprint": "abc",
                    "share": true,
                }),
                &token,
                &[("X-Forwarded-For", "10.0.0.1, 10.0.0.2")],
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["status"], "OK");
        let id = res.solution_id();

        let row = solution::Entity::find_by_id(id)
            .one(&app.db)
            .await
            .unwrap()
            .expect("solution row");
        assert_eq!(row.problem_id, 42);
        assert_eq!(row.user_id, 5);
        assert_eq!(row.language, 1);
        assert_eq!(row.ip, "10.0.0.1");
        assert_eq!(row.code_length, 13);
        assert_eq!(row.share, Some(true));
        assert_eq!(row.judger, ::common::judger::UNASSIGNED_JUDGER);
        assert_eq!(row.fingerprint, "abc");
        assert_eq!(row.contest_id, None);

        assert_eq!(row_counts(&app).await, (1, 1, 1, 0));
    }

    #[tokio::test]
    async fn instanced_problem_stores_custom_input() {
        let app = TestApp::spawn().await;
        app.seed_problem(42, false).await;
        let token = app.visitor_token(5);

        let res = app
            .submit(
                &json!({
                    "type": "problem",
                    "id": "-42",
                    "language": "1",
                    "source": "print(input())",
                    "input_text": "hello",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let id = res.solution_id();

        let row = solution::Entity::find_by_id(id).one(&app.db).await.unwrap().unwrap();
        assert_eq!(row.problem_id, -42);
        let input = custom_input::Entity::find_by_id(id)
            .one(&app.db)
            .await
            .unwrap()
            .expect("custom input row");
        assert_eq!(input.input_text, "hello");
    }

    #[tokio::test]
    async fn failed_derived_write_rolls_back_everything() {
        let app = TestApp::spawn().await;
        app.seed_problem(42, false).await;
        app.db
            .execute_unprepared("DROP TABLE custom_input")
            .await
            .expect("drop custom_input");

        let res = app
            .submit(
                &json!({
                    "type": "problem",
                    "id": -42,
                    "language": 1,
                    "source": "print(input())",
                    "input_text": "hello",
                }),
                &app.visitor_token(5),
            )
            .await;

        assert_eq!(res.status, 500, "{}", res.text);
        assert_eq!(res.body["code"], "PERSISTENCE_FAILURE");
        assert_eq!(solution::Entity::find().count(&app.db).await.unwrap(), 0);
        assert_eq!(source_code_user::Entity::find().count(&app.db).await.unwrap(), 0);
        assert_eq!(source_code::Entity::find().count(&app.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn templates_wrap_judged_source_only() {
        let app = TestApp::spawn().await;
        app.seed_problem(42, false).await;
        app.seed_template(42, 2, "#include <cstdio>", true).await;
        app.seed_template(42, 2, "// end", false).await;
        let token = app.visitor_token(5);

        let res = app
            .submit(
                &json!({"type": "problem", "id": 42, "language": 2, "source": "int main() {}"}),
                &token,
            )
            .await;
        let id = res.solution_id();

        let user = source_code_user::Entity::find_by_id(id)
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        let judged = source_code::Entity::find_by_id(id)
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.source, "int main() {}");
        assert_eq!(judged.source, "#include <cstdio>\nint main() {}\n// end");
    }

    #[tokio::test]
    async fn hidden_problem_needs_privilege() {
        let app = TestApp::spawn().await;
        app.seed_problem(7, true).await;
        let body = json!({"type": "problem", "id": 7, "language": 0, "source": "x"});

        let res = app.submit(&body, &app.visitor_token(5)).await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "NO_PRIVILEGE");
        assert_eq!(
            res.body["statement"],
            "You don't have privilege to access this problem"
        );

        let editor = SessionCapabilities {
            editor: true,
            ..Default::default()
        };
        let res = app.submit(&body, &app.token(6, &editor)).await;
        assert_eq!(res.status, 200, "{}", res.text);
    }

    #[tokio::test]
    async fn problem_in_upcoming_contest_is_closed() {
        let app = TestApp::spawn().await;
        app.seed_problem(42, false).await;
        let now = Utc::now();
        app.seed_contest(3, now + Duration::days(1), now + Duration::days(2), None)
            .await;
        app.seed_contest_problem(3, 1, 42).await;

        let res = app
            .submit(
                &json!({"type": "problem", "id": 42, "language": 0, "source": "x"}),
                &app.visitor_token(5),
            )
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["statement"], "problem is in current or future contest.");
        assert_eq!(row_counts(&app).await, (0, 0, 0, 0));
    }

    #[tokio::test]
    async fn unknown_problem_and_language() {
        let app = TestApp::spawn().await;
        app.seed_problem(42, false).await;
        let token = app.visitor_token(5);

        let res = app
            .submit(
                &json!({"type": "problem", "id": 43, "language": 0, "source": "x"}),
                &token,
            )
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["statement"], "problem is not exist");

        let res = app
            .submit(
                &json!({"type": "problem", "id": 42, "language": 64, "source": "x"}),
                &token,
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "LANGUAGE_NOT_ALLOWED");
        assert_eq!(res.body["statement"], "Your language is not valid");
    }
}

mod contest {
    use super::*;

    #[tokio::test]
    async fn instanced_contest_submission() {
        let app = TestApp::spawn().await;
        app.seed_problem(100, false).await;
        app.seed_running_contest(7).await;
        app.seed_contest_problem(7, 3, 100).await;

        let res = app
            .submit(
                &json!({
                    "type": "contest",
                    "cid": "-7",
                    "pid": 3,
                    "language": 0,
                    "source": "int main() {}",
                    "input_text": "5 5",
                    "share": true,
                }),
                &app.visitor_token(5),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let id = res.solution_id();
        let row = solution::Entity::find_by_id(id).one(&app.db).await.unwrap().unwrap();
        assert_eq!(row.problem_id, -100);
        assert_eq!(row.contest_id, Some(7));
        assert_eq!(row.num, Some(3));
        assert_eq!(row.share, None);

        let input = custom_input::Entity::find_by_id(id)
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(input.input_text, "5 5");
        assert_eq!(row_counts(&app).await, (1, 1, 1, 1));
    }

    #[tokio::test]
    async fn closed_contest_rejects_everyone() {
        let app = TestApp::spawn().await;
        app.seed_problem(100, false).await;
        let now = Utc::now();
        app.seed_contest(7, now - Duration::days(2), now - Duration::days(1), None)
            .await;
        app.seed_contest_problem(7, 1, 100).await;
        let admin = SessionCapabilities {
            admin: true,
            ..Default::default()
        };
        let body = json!({"type": "contest", "cid": 7, "pid": 1, "language": 0, "source": "x"});

        for token in [app.visitor_token(5), app.token(6, &admin)] {
            let res = app.submit(&body, &token).await;
            assert_eq!(res.status, 403);
            assert_eq!(res.body["code"], "SCHEDULE_VIOLATION");
            assert_eq!(res.body["statement"], "Contest is not start");
        }
    }

    #[tokio::test]
    async fn contest_language_mask_applies() {
        let app = TestApp::spawn().await;
        app.seed_problem(100, false).await;
        let now = Utc::now();
        app.seed_contest(7, now - Duration::hours(1), now + Duration::hours(1), Some(0b1))
            .await;
        app.seed_contest_problem(7, 1, 100).await;
        let maker = SessionCapabilities {
            contest_maker: BTreeSet::from([7]),
            ..Default::default()
        };

        let res = app
            .submit(
                &json!({"type": "contest", "cid": 7, "pid": 1, "language": 0, "source": "x"}),
                &app.token(5, &maker),
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["statement"], "Your submission's language is invalid");
    }

    #[tokio::test]
    async fn defunct_contest_admits_only_privileged() {
        let app = TestApp::spawn().await;
        app.seed_problem(100, false).await;
        app.seed_running_contest(7).await;
        app.seed_contest_problem(7, 1, 100).await;
        app.retire_contest(7).await;
        let body = json!({"type": "contest", "cid": 7, "pid": 1, "language": 0, "source": "x"});

        let res = app.submit(&body, &app.visitor_token(5)).await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "NO_PRIVILEGE");
        assert_eq!(
            res.body["statement"],
            "You don't have privilege to access this contest problem"
        );
        assert_eq!(row_counts(&app).await, (0, 0, 0, 0));

        let maker = SessionCapabilities {
            contest_maker: BTreeSet::from([7]),
            ..Default::default()
        };
        let res = app.submit(&body, &app.token(6, &maker)).await;
        assert_eq!(res.status, 200, "{}", res.text);
    }

    #[tokio::test]
    async fn unknown_contest_problem() {
        let app = TestApp::spawn().await;
        app.seed_running_contest(7).await;

        let res = app
            .submit(
                &json!({"type": "contest", "cid": 7, "pid": 9, "language": 0, "source": "x"}),
                &app.visitor_token(5),
            )
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["statement"], "problem is not in contest");
    }
}

mod topic {
    use super::*;

    #[tokio::test]
    async fn open_topic_admits_visitor() {
        let app = TestApp::spawn().await;
        app.seed_problem(100, false).await;
        app.seed_topic(9, false).await;
        app.seed_topic_problem(9, 1, 100).await;

        let res = app
            .submit(
                &json!({"type": "topic", "tid": 9, "pid": 1, "language": 0, "source": "x"}),
                &app.visitor_token(5),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let row = solution::Entity::find_by_id(res.solution_id())
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.topic_id, Some(9));
        assert_eq!(row.num, Some(1));
        assert_eq!(row.problem_id, 100);
    }

    #[tokio::test]
    async fn unmapped_topic_problem() {
        let app = TestApp::spawn().await;
        app.seed_topic(9, false).await;

        let res = app
            .submit(
                &json!({"type": "topic", "tid": 9, "pid": 99, "language": 0, "source": "x"}),
                &app.visitor_token(5),
            )
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_IN_CONTAINER");
        assert_eq!(res.body["statement"], "problem is not in topic");
    }

    #[tokio::test]
    async fn private_topic_is_admin_only() {
        let app = TestApp::spawn().await;
        app.seed_problem(100, false).await;
        app.seed_topic(9, true).await;
        app.seed_topic_problem(9, 1, 100).await;
        let body = json!({"type": "topic", "tid": 9, "pid": 1, "language": 0, "source": "x"});

        let res = app.submit(&body, &app.visitor_token(5)).await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["statement"], "You don't have privilege to access this topic");

        let admin = SessionCapabilities {
            admin: true,
            ..Default::default()
        };
        let res = app.submit(&body, &app.token(6, &admin)).await;
        assert_eq!(res.status, 200, "{}", res.text);
    }

    #[tokio::test]
    async fn defunct_topic_admits_only_admin() {
        let app = TestApp::spawn().await;
        app.seed_problem(100, false).await;
        app.seed_topic(9, false).await;
        app.seed_topic_problem(9, 1, 100).await;
        app.retire_topic(9).await;
        let body = json!({"type": "topic", "tid": 9, "pid": 1, "language": 0, "source": "x"});

        let res = app.submit(&body, &app.visitor_token(5)).await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "NO_PRIVILEGE");

        let admin = SessionCapabilities {
            admin: true,
            ..Default::default()
        };
        let res = app.submit(&body, &app.token(6, &admin)).await;
        assert_eq!(res.status, 200, "{}", res.text);
    }
}

mod request_validation {
    use super::*;

    #[tokio::test]
    async fn token_is_required() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::SUBMISSIONS,
                &json!({"type": "problem", "id": 1, "language": 0, "source": "x"}),
            )
            .await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");

        let res = app
            .submit(
                &json!({"type": "problem", "id": 1, "language": 0, "source": "x"}),
                "not-a-token",
            )
            .await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn bad_type_and_ids() {
        let app = TestApp::spawn().await;
        let token = app.visitor_token(5);

        let res = app
            .submit(&json!({"type": "exam", "id": 1, "language": 0, "source": "x"}), &token)
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["status"], "error");
        assert_eq!(res.body["statement"], "submission type is not valid");

        let res = app
            .submit(
                &json!({"type": "contest", "cid": "seven", "pid": 1, "language": 0, "source": "x"}),
                &token,
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["statement"], "Invalid contest_id or pid");

        let res = app
            .submit(&json!({"type": "problem", "id": 3.5, "language": 0, "source": "x"}), &token)
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["statement"], "Problem ID is not valid");
    }

    #[tokio::test]
    async fn oversized_source_is_rejected() {
        let app = TestApp::spawn_with(SubmissionConfig {
            max_source_size: 16,
            ..Default::default()
        })
        .await;
        app.seed_problem(42, false).await;

        let res = app
            .submit(
                &json!({"type": "problem", "id": 42, "language": 0, "source": "x".repeat(17)}),
                &app.visitor_token(5),
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "INVALID_REQUEST");
        assert_eq!(row_counts(&app).await, (0, 0, 0, 0));
    }

    #[tokio::test]
    async fn openapi_document_lists_submit() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::OPENAPI).await;
        assert_eq!(res.status, 200);
        let paths = res.body["paths"].as_object().expect("paths object");
        assert!(
            paths
                .iter()
                .any(|(path, item)| path.starts_with(routes::SUBMISSIONS) && item["post"].is_object())
        );
    }
}
