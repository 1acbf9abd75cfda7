use league::error::AppError;
use league::models::pavilion::{CreatePavilion, UpdatePavilion};
use league::repository;

use crate::common::{BASE_URL, TestApp, png, tiff, upload};

fn payload(name: &str) -> CreatePavilion {
    CreatePavilion {
        name: name.into(),
        location: "Avenida Central".into(),
        location_link: None,
    }
}

mod pavilion_create {
    use super::*;

    #[tokio::test]
    async fn stores_artifact_in_pavilion_folder() {
        let app = TestApp::spawn().await;
        let pavilion = app.create_pavilion("Pavilhão Norte").await;

        let prefix = format!("{BASE_URL}/pavilions/{}/", pavilion.id);
        assert!(pavilion.image.starts_with(&prefix), "{}", pavilion.image);
        assert!(pavilion.image.ends_with(".jpg"));
        assert!(app.artifact_exists(&pavilion.image).await);

        let stored = repository::get_pavilion(&app.state.db, pavilion.id)
            .await
            .unwrap();
        assert_eq!(stored, pavilion);
    }

    #[tokio::test]
    async fn invalid_image_leaves_no_row() {
        let app = TestApp::spawn().await;

        let err = repository::create_pavilion(
            &app.state,
            payload("Broken"),
            upload(b"not_an_image".to_vec()),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::InvalidImage(_)));
        assert!(repository::list_pavilions(&app.state.db)
            .await
            .unwrap()
            .is_empty());
        assert!(app.store.is_empty().await);
    }

    #[tokio::test]
    async fn disallowed_format_is_reported_by_name() {
        let app = TestApp::spawn().await;

        let err = repository::create_pavilion(&app.state, payload("Tiff"), upload(tiff([1, 2, 3])))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidImageFormat(ref f) if f == "TIFF"));
        assert!(repository::list_pavilions(&app.state.db)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn rejects_overlong_name() {
        let app = TestApp::spawn().await;
        let err = repository::create_pavilion(
            &app.state,
            payload(&"x".repeat(201)),
            upload(png([0, 0, 0])),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

mod pavilion_update {
    use super::*;

    #[tokio::test]
    async fn new_image_replaces_old_artifact() {
        let app = TestApp::spawn().await;
        let pavilion = app.create_pavilion("Arena").await;
        let old_image = pavilion.image.clone();

        let updated = repository::update_pavilion(
            &app.state,
            pavilion.id,
            UpdatePavilion::default(),
            Some(upload(png([0, 255, 0]))),
        )
        .await
        .unwrap();

        assert_ne!(updated.image, old_image);
        assert!(!app.artifact_exists(&old_image).await);
        assert!(app.artifact_exists(&updated.image).await);
        assert_eq!(
            app.artifacts(&format!("pavilions/{}", pavilion.id))
                .await
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn fields_only_keeps_image() {
        let app = TestApp::spawn().await;
        let pavilion = app.create_pavilion("Arena").await;

        let updated = repository::update_pavilion(
            &app.state,
            pavilion.id,
            UpdatePavilion {
                name: Some("  Arena Nova ".into()),
                location_link: Some(None),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();

        assert_eq!(updated.name, "Arena Nova");
        assert_eq!(updated.location_link, None);
        assert_eq!(updated.image, pavilion.image);
    }

    #[tokio::test]
    async fn invalid_new_image_keeps_everything() {
        let app = TestApp::spawn().await;
        let pavilion = app.create_pavilion("Arena").await;

        let err = repository::update_pavilion(
            &app.state,
            pavilion.id,
            UpdatePavilion {
                name: Some("Renamed".into()),
                ..Default::default()
            },
            Some(upload(b"garbage".to_vec())),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::InvalidImage(_)));
        let stored = repository::get_pavilion(&app.state.db, pavilion.id)
            .await
            .unwrap();
        assert_eq!(stored.name, "Arena");
        assert!(app.artifact_exists(&stored.image).await);
    }

    #[tokio::test]
    async fn missing_pavilion_is_not_found() {
        let app = TestApp::spawn().await;
        let err = repository::update_pavilion(
            &app.state,
            999,
            UpdatePavilion {
                name: Some("Ghost".into()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

mod pavilion_delete {
    use super::*;

    #[tokio::test]
    async fn removes_artifact_then_row() {
        let app = TestApp::spawn().await;
        let pavilion = app.create_pavilion("Arena").await;

        repository::delete_pavilion(&app.state, pavilion.id)
            .await
            .unwrap();

        assert!(!app.artifact_exists(&pavilion.image).await);
        assert!(matches!(
            repository::get_pavilion(&app.state.db, pavilion.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn conflicts_while_a_club_plays_there() {
        let app = TestApp::spawn().await;
        let pavilion = app.create_pavilion("Arena").await;
        app.create_club("Tenants", pavilion.id).await;

        let err = repository::delete_pavilion(&app.state, pavilion.id)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert!(app.artifact_exists(&pavilion.image).await);
    }

    #[tokio::test]
    async fn strict_mode_keeps_row_when_artifact_is_gone() {
        let app = TestApp::spawn().await;
        let pavilion = app.create_pavilion("Arena").await;
        app.state.images.remove(&pavilion.image).await.unwrap();

        let err = repository::delete_pavilion(&app.state, pavilion.id)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ImageNotFound(_)));
        assert!(repository::get_pavilion(&app.state.db, pavilion.id)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn lenient_mode_ignores_missing_artifact() {
        let app = TestApp::spawn_lenient().await;
        let pavilion = app.create_pavilion("Arena").await;
        app.state.images.remove(&pavilion.image).await.unwrap();

        repository::delete_pavilion(&app.state, pavilion.id)
            .await
            .unwrap();
        assert!(repository::list_pavilions(&app.state.db)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn unavailable_storage_keeps_row() {
        let app = TestApp::spawn().await;
        let pavilion = app.create_pavilion("Arena").await;

        app.store.set_offline(true);
        let err = repository::delete_pavilion(&app.state, pavilion.id)
            .await
            .unwrap_err();
        app.store.set_offline(false);

        assert!(matches!(err, AppError::StorageUnavailable(_)));
        assert!(app.artifact_exists(&pavilion.image).await);
        assert!(repository::get_pavilion(&app.state.db, pavilion.id)
            .await
            .is_ok());
    }
}
