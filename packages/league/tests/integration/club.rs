use chrono::{TimeZone, Utc};
use league::error::AppError;
use league::models::club::{CreateClub, UpdateClub};
use league::models::game::CreateGame;
use league::repository;

use crate::common::{BASE_URL, TestApp, png, upload};

mod club_create {
    use super::*;

    #[tokio::test]
    async fn crest_lands_in_club_folder() {
        let app = TestApp::spawn().await;
        let pavilion = app.create_pavilion("Home").await;
        let club = app.create_club("Académica", pavilion.id).await;

        assert!(
            club.image
                .starts_with(&format!("{BASE_URL}/clubs/{}/", club.id))
        );
        assert!(app.artifact_exists(&club.image).await);
        assert_eq!(club.pavilion_id, pavilion.id);
    }

    #[tokio::test]
    async fn unknown_pavilion_is_not_found() {
        let app = TestApp::spawn().await;
        let err = repository::create_club(
            &app.state,
            CreateClub {
                name: "Nomads".into(),
                pavilion_id: 404,
            },
            upload(png([1, 1, 1])),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(app.store.is_empty().await);
    }

    #[tokio::test]
    async fn same_crest_for_two_clubs_is_stored_twice() {
        let app = TestApp::spawn().await;
        let pavilion = app.create_pavilion("Shared").await;
        let a = app.create_club("A", pavilion.id).await;
        let b = app.create_club("B", pavilion.id).await;

        assert_ne!(a.image, b.image);
        repository::update_club(
            &app.state,
            a.id,
            UpdateClub::default(),
            Some(upload(png([9, 9, 9]))),
        )
        .await
        .unwrap();
        assert!(app.artifact_exists(&b.image).await);
    }
}

mod club_queries {
    use super::*;

    #[tokio::test]
    async fn lists_by_name_and_resolves_pavilion() {
        let app = TestApp::spawn().await;
        let pavilion = app.create_pavilion("Home").await;
        app.create_club("Zebras", pavilion.id).await;
        let club = app.create_club("Ants", pavilion.id).await;

        let names: Vec<_> = repository::list_clubs(&app.state.db)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Ants", "Zebras"]);

        let home = repository::get_club_pavilion(&app.state.db, club.id)
            .await
            .unwrap();
        assert_eq!(home.id, pavilion.id);
    }

    #[tokio::test]
    async fn missing_club_is_not_found() {
        let app = TestApp::spawn().await;
        assert!(matches!(
            repository::get_club(&app.state.db, 1).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            repository::get_club_pavilion(&app.state.db, 1).await,
            Err(AppError::NotFound(_))
        ));
    }
}

mod club_update {
    use super::*;

    #[tokio::test]
    async fn moves_to_existing_pavilion_only() {
        let app = TestApp::spawn().await;
        let first = app.create_pavilion("First").await;
        let second = app.create_pavilion("Second").await;
        let club = app.create_club("Movers", first.id).await;

        let moved = repository::update_club(
            &app.state,
            club.id,
            UpdateClub {
                pavilion_id: Some(second.id),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
        assert_eq!(moved.pavilion_id, second.id);
        assert_eq!(moved.image, club.image);

        let err = repository::update_club(
            &app.state,
            club.id,
            UpdateClub {
                pavilion_id: Some(777),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn replacing_crest_with_identical_bytes_is_stable() {
        let app = TestApp::spawn().await;
        let pavilion = app.create_pavilion("Home").await;
        let club = app.create_club("Same", pavilion.id).await;

        let updated = repository::update_club(
            &app.state,
            club.id,
            UpdateClub::default(),
            Some(upload(png([200, 40, 40]))),
        )
        .await
        .unwrap();

        assert_eq!(updated.image, club.image);
        assert!(app.artifact_exists(&updated.image).await);
    }
}

mod club_delete {
    use super::*;

    #[tokio::test]
    async fn conflicts_while_scheduled() {
        let app = TestApp::spawn().await;
        let pavilion = app.create_pavilion("Home").await;
        let home = app.create_club("Home FC", pavilion.id).await;
        let away = app.create_club("Away FC", pavilion.id).await;
        repository::create_game(
            &app.state,
            CreateGame {
                matchday: 1,
                score_home: None,
                score_visitor: None,
                date_time: Utc.with_ymd_and_hms(2025, 9, 13, 18, 0, 0).unwrap(),
                club_home_id: home.id,
                club_visitor_id: away.id,
                pavilion_id: pavilion.id,
                finished: false,
            },
        )
        .await
        .unwrap();

        let err = repository::delete_club(&app.state, away.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(app.artifact_exists(&away.image).await);
    }

    #[tokio::test]
    async fn removes_crest_and_row() {
        let app = TestApp::spawn().await;
        let pavilion = app.create_pavilion("Home").await;
        let club = app.create_club("Gone", pavilion.id).await;

        repository::delete_club(&app.state, club.id).await.unwrap();

        assert!(!app.artifact_exists(&club.image).await);
        assert!(app.artifacts(&format!("clubs/{}", club.id)).await.is_empty());
        assert!(repository::get_club(&app.state.db, club.id).await.is_err());
        // pavilion artifact untouched
        assert!(app.artifact_exists(&pavilion.image).await);
    }
}
