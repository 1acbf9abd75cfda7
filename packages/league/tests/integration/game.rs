use chrono::{DateTime, TimeZone, Utc};
use league::error::AppError;
use league::models::game::{CreateGame, UpdateGame};
use league::repository;

use crate::common::TestApp;

fn kickoff(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, day, hour, 0, 0).unwrap()
}

struct Fixture {
    app: TestApp,
    home: i32,
    away: i32,
    pavilion: i32,
}

async fn fixture() -> Fixture {
    let app = TestApp::spawn().await;
    let pavilion = app.create_pavilion("Municipal").await;
    let home = app.create_club("Home", pavilion.id).await;
    let away = app.create_club("Away", pavilion.id).await;
    Fixture {
        home: home.id,
        away: away.id,
        pavilion: pavilion.id,
        app,
    }
}

fn game(f: &Fixture, matchday: i32, date_time: DateTime<Utc>) -> CreateGame {
    CreateGame {
        matchday,
        score_home: None,
        score_visitor: None,
        date_time,
        club_home_id: f.home,
        club_visitor_id: f.away,
        pavilion_id: f.pavilion,
        finished: false,
    }
}

mod game_create {
    use super::*;

    #[tokio::test]
    async fn creates_unfinished_game() {
        let f = fixture().await;
        let created = repository::create_game(&f.app.state, game(&f, 1, kickoff(4, 18)))
            .await
            .unwrap();

        assert!(!created.finished);
        assert_eq!(created.date_time, kickoff(4, 18));
        assert_eq!(
            repository::get_game(&f.app.state.db, created.id)
                .await
                .unwrap(),
            created
        );
    }

    #[tokio::test]
    async fn club_cannot_play_itself() {
        let f = fixture().await;
        let mut payload = game(&f, 1, kickoff(4, 18));
        payload.club_visitor_id = f.home;

        let err = repository::create_game(&f.app.state, payload)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_references_are_not_found() {
        let f = fixture().await;

        let mut payload = game(&f, 1, kickoff(4, 18));
        payload.club_visitor_id = 999;
        let err = repository::create_game(&f.app.state, payload)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Club not found"));

        let mut payload = game(&f, 1, kickoff(4, 18));
        payload.pavilion_id = 999;
        let err = repository::create_game(&f.app.state, payload)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Pavilion not found"));
    }

    #[tokio::test]
    async fn rejects_negative_score_and_zero_matchday() {
        let f = fixture().await;

        let mut payload = game(&f, 1, kickoff(4, 18));
        payload.score_home = Some(-2);
        assert!(matches!(
            repository::create_game(&f.app.state, payload).await,
            Err(AppError::Validation(_))
        ));

        assert!(matches!(
            repository::create_game(&f.app.state, game(&f, 0, kickoff(4, 18))).await,
            Err(AppError::Validation(_))
        ));
    }
}

mod game_queries {
    use super::*;

    #[tokio::test]
    async fn listed_in_kickoff_order() {
        let f = fixture().await;
        let late = repository::create_game(&f.app.state, game(&f, 2, kickoff(11, 20)))
            .await
            .unwrap();
        let early = repository::create_game(&f.app.state, game(&f, 1, kickoff(4, 18)))
            .await
            .unwrap();
        let same_time = repository::create_game(&f.app.state, game(&f, 1, kickoff(4, 18)))
            .await
            .unwrap();

        let ids: Vec<_> = repository::list_games(&f.app.state.db)
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, [early.id, same_time.id, late.id]);
    }
}

mod game_update {
    use super::*;

    #[tokio::test]
    async fn records_result() {
        let f = fixture().await;
        let created = repository::create_game(&f.app.state, game(&f, 1, kickoff(4, 18)))
            .await
            .unwrap();

        let updated = repository::update_game(
            &f.app.state,
            created.id,
            UpdateGame {
                score_home: Some(Some(3)),
                score_visitor: Some(Some(1)),
                finished: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!((updated.score_home, updated.score_visitor), (Some(3), Some(1)));
        assert!(updated.finished);
        assert_eq!(updated.matchday, 1);
    }

    #[tokio::test]
    async fn merged_result_is_validated() {
        let f = fixture().await;
        let created = repository::create_game(&f.app.state, game(&f, 1, kickoff(4, 18)))
            .await
            .unwrap();

        let err = repository::update_game(
            &f.app.state,
            created.id,
            UpdateGame {
                club_home_id: Some(f.away),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let unchanged = repository::get_game(&f.app.state.db, created.id)
            .await
            .unwrap();
        assert_eq!(unchanged, created);
    }
}

mod game_delete {
    use super::*;

    #[tokio::test]
    async fn delete_then_not_found() {
        let f = fixture().await;
        let created = repository::create_game(&f.app.state, game(&f, 1, kickoff(4, 18)))
            .await
            .unwrap();

        repository::delete_game(&f.app.state, created.id)
            .await
            .unwrap();
        assert!(matches!(
            repository::delete_game(&f.app.state, created.id).await,
            Err(AppError::NotFound(_))
        ));

        // clubs are free to go once their games are gone
        repository::delete_club(&f.app.state, f.away).await.unwrap();
    }
}
