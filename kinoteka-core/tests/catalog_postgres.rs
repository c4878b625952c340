use std::sync::Arc;

use anyhow::Result;
use kinoteka_core::database::ports::{
    MoviesRepository, RecommendationsRepository, ReferenceRepository,
    SeasonsRepository,
};
use kinoteka_core::database::postgres::PostgresDatabase;
use kinoteka_core::{AppUnitOfWork, CatalogError, CatalogService};
use kinoteka_model::{
    AgeRatingId, CategoryId, EpisodeDraft, GenreId, MediaUpdate, MovieDraft,
    MovieFilters, MovieId, MovieTypeId, RecommendationDraft, ReferenceDraft,
    SeasonDraft,
};
use sqlx::PgPool;

fn draft(title: &str, year: i32) -> MovieDraft {
    MovieDraft {
        title: title.to_string(),
        description: format!("{title} description"),
        release_year: year,
        runtime: 110,
        keywords: vec!["archive".into()],
        director: "R. Director".into(),
        producer: "P. Producer".into(),
        movie_type_id: MovieTypeId::new(1),
        genre_ids: vec![GenreId::new(1), GenreId::new(2)],
        category_ids: vec![CategoryId::new(1), CategoryId::new(2)],
        age_ids: vec![AgeRatingId::new(2)],
    }
}

fn season(number: i32, episodes: i32) -> SeasonDraft {
    SeasonDraft {
        number,
        episodes: (1..=episodes)
            .map(|n| EpisodeDraft {
                number: n,
                video_url: format!("videos/s{number}/e{n}.mp4"),
            })
            .collect(),
    }
}

async fn count(pool: &PgPool, table: &str) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    Ok(sqlx::query_scalar(&sql).fetch_one(pool).await?)
}

#[sqlx::test(
    migrator = "kinoteka_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("reference_data"))
)]
async fn find_by_id_collapses_join_fanout(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool.clone());

    let id = db.movies().create(&draft("Stalker", 1979)).await?;
    db.seasons().create(id, &season(1, 3)).await?;
    db.seasons().create(id, &season(2, 2)).await?;

    let movie = db.movies().find_by_id(id).await?;
    assert_eq!(movie.title, "Stalker");
    assert_eq!(movie.keywords, vec!["archive".to_string()]);
    assert_eq!(movie.genres.len(), 2);
    assert_eq!(movie.categories.len(), 2);
    assert_eq!(movie.ages.len(), 1);
    assert_eq!(
        movie.movie_type.as_ref().map(|t| t.title.as_str()),
        Some("Feature film")
    );
    assert!(movie.cover.is_none());

    let numbers: Vec<i32> = movie.seasons.iter().map(|s| s.number).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(movie.seasons[0].episodes.len(), 3);
    assert_eq!(movie.seasons[1].episodes.len(), 2);
    assert_eq!(movie.episode_count(), 5);

    Ok(())
}

#[sqlx::test(
    migrator = "kinoteka_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("reference_data"))
)]
async fn movie_without_associations_has_empty_collections(
    pool: PgPool,
) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool);

    let mut bare = draft("Bare", 2001);
    bare.genre_ids.clear();
    bare.category_ids.clear();
    bare.age_ids.clear();
    let id = db.movies().create(&bare).await?;

    let movie = db.movies().find_by_id(id).await?;
    assert!(movie.genres.is_empty());
    assert!(movie.categories.is_empty());
    assert!(movie.ages.is_empty());
    assert!(movie.seasons.is_empty());

    Ok(())
}

#[sqlx::test(migrator = "kinoteka_core::MIGRATOR")]
async fn find_by_id_reports_missing_movie(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool);

    let err = db
        .movies()
        .find_by_id(MovieId::new(4242))
        .await
        .expect_err("no movie was created");
    assert!(matches!(err, CatalogError::NotFound(_)));

    Ok(())
}

#[sqlx::test(
    migrator = "kinoteka_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("reference_data"))
)]
async fn failed_association_rolls_back_movie_row(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool.clone());

    let mut broken = draft("Broken", 1999);
    broken.category_ids = vec![CategoryId::new(1), CategoryId::new(999)];

    let err = db
        .movies()
        .create(&broken)
        .await
        .expect_err("category 999 does not exist");
    assert!(matches!(err, CatalogError::Conflict(_)));

    assert_eq!(count(&pool, "movies").await?, 0);
    assert_eq!(count(&pool, "movie_genres").await?, 0);
    assert_eq!(count(&pool, "movie_categories").await?, 0);

    Ok(())
}

#[sqlx::test(
    migrator = "kinoteka_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("reference_data"))
)]
async fn failed_write_inside_transaction_is_a_transaction_error(
    pool: PgPool,
) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool.clone());

    // The repository does not validate; the CHECK constraint rejects it.
    let negative = MovieDraft {
        runtime: -5,
        ..draft("Negative", 2005)
    };
    let err = db
        .movies()
        .create(&negative)
        .await
        .expect_err("runtime violates the check constraint");
    assert!(
        matches!(err, CatalogError::Transaction(_)),
        "unexpected error: {err:?}"
    );
    assert_eq!(count(&pool, "movies").await?, 0);

    Ok(())
}

#[sqlx::test(
    migrator = "kinoteka_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("reference_data"))
)]
async fn update_replaces_every_association(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool);

    let id = db.movies().create(&draft("Solaris", 1972)).await?;

    let mut next = draft("Solaris (restored)", 1972);
    next.genre_ids.clear();
    next.category_ids = vec![CategoryId::new(2)];
    next.age_ids = vec![AgeRatingId::new(1), AgeRatingId::new(3)];
    db.movies().update(id, &next).await?;

    let movie = db.movies().find_by_id(id).await?;
    assert_eq!(movie.title, "Solaris (restored)");
    assert!(movie.genres.is_empty());
    let categories: Vec<i32> =
        movie.categories.iter().map(|c| c.id.get()).collect();
    assert_eq!(categories, vec![2]);
    let ages: Vec<i32> = movie.ages.iter().map(|a| a.id.get()).collect();
    assert_eq!(ages, vec![1, 3]);

    let err = db
        .movies()
        .update(MovieId::new(777), &next)
        .await
        .expect_err("movie 777 does not exist");
    assert!(matches!(err, CatalogError::NotFound(_)));

    Ok(())
}

#[sqlx::test(
    migrator = "kinoteka_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("reference_data"))
)]
async fn filters_intersect_across_dimensions(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool);

    let drama = db.movies().create(&draft("Drama only", 1980)).await?;

    let mut comedy = draft("Comedy only", 1990);
    comedy.genre_ids = vec![GenreId::new(2)];
    comedy.category_ids = vec![CategoryId::new(1)];
    let comedy = db.movies().create(&comedy).await?;

    let mut adventure = draft("Adventure", 2000);
    adventure.genre_ids = vec![GenreId::new(3)];
    adventure.category_ids = vec![CategoryId::new(2)];
    let adventure = db.movies().create(&adventure).await?;

    let everything = db.movies().find_all(&MovieFilters::new()).await?;
    let ids: Vec<MovieId> = everything.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![drama, comedy, adventure]);

    let comedies = db
        .movies()
        .find_all(&MovieFilters::new().genre("2"))
        .await?;
    let ids: Vec<MovieId> = comedies.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![drama, comedy]);

    let narrowed = db
        .movies()
        .find_all(&MovieFilters::new().genre("2").category("2"))
        .await?;
    let ids: Vec<MovieId> = narrowed.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![drama]);

    let none = db
        .movies()
        .find_all(&MovieFilters::new().genre("3").category("1"))
        .await?;
    assert!(none.is_empty());

    Ok(())
}

#[sqlx::test(migrator = "kinoteka_core::MIGRATOR")]
async fn non_numeric_filter_is_a_database_error(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool);

    let err = db
        .movies()
        .find_all(&MovieFilters::new().genre("drama"))
        .await
        .expect_err("genre filter is not numeric");
    assert!(err.is_malformed_parameter(), "unexpected error: {err:?}");

    Ok(())
}

#[sqlx::test(
    migrator = "kinoteka_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("reference_data"))
)]
async fn overflowing_filter_is_malformed(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool);

    let err = db
        .movies()
        .find_all(&MovieFilters::new().category("1").genre("99999999999"))
        .await
        .expect_err("genre filter does not fit an integer");
    assert_eq!(err.sql_state().as_deref(), Some("22003"));
    assert!(err.is_malformed_parameter(), "unexpected error: {err:?}");

    Ok(())
}

#[sqlx::test(
    migrator = "kinoteka_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("reference_data"))
)]
async fn delete_cascades_to_children(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool.clone());

    let id = db.movies().create(&draft("Mirror", 1975)).await?;
    db.seasons().create(id, &season(1, 4)).await?;
    db.recommendations()
        .create(&RecommendationDraft {
            movie_id: id,
            position: 1,
        })
        .await?;
    let keep = db.movies().create(&draft("Nostalghia", 1983)).await?;

    db.movies().delete(id).await?;

    assert!(!db.movies().exists(id).await?);
    assert!(db.movies().exists(keep).await?);
    assert_eq!(count(&pool, "seasons").await?, 0);
    assert_eq!(count(&pool, "episodes").await?, 0);
    assert_eq!(count(&pool, "recommended_movies").await?, 0);
    assert_eq!(count(&pool, "movie_genres").await?, 2);

    let err = db.movies().delete(id).await.expect_err("already deleted");
    assert!(matches!(err, CatalogError::NotFound(_)));

    Ok(())
}

#[sqlx::test(
    migrator = "kinoteka_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("reference_data"))
)]
async fn catalog_rejects_unknown_references_before_writing(
    pool: PgPool,
) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool.clone());
    let catalog = CatalogService::new(Arc::new(AppUnitOfWork::from_postgres(&db)));

    let mut bad = draft("Unknown genre", 2010);
    bad.genre_ids = vec![GenreId::new(1), GenreId::new(50)];

    let err = catalog
        .create_movie(&bad)
        .await
        .expect_err("genre 50 does not exist");
    match err {
        CatalogError::UnknownReferences { kind, ids } => {
            assert_eq!(kind, "genre");
            assert_eq!(ids, vec![50]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(count(&pool, "movies").await?, 0);

    Ok(())
}

#[sqlx::test(
    migrator = "kinoteka_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("reference_data"))
)]
async fn referenced_genre_cannot_be_deleted(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool);

    db.movies().create(&draft("Andrei Rublev", 1966)).await?;

    let err = db
        .genres()
        .delete(GenreId::new(1))
        .await
        .expect_err("genre 1 is linked to a movie");
    assert!(matches!(err, CatalogError::Conflict(_)));

    let created = db
        .genres()
        .create(&ReferenceDraft {
            title: "Documentary".into(),
            poster_url: None,
        })
        .await?;
    db.genres().delete(created).await?;

    Ok(())
}

#[sqlx::test(
    migrator = "kinoteka_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("reference_data"))
)]
async fn search_and_media_round_through_catalog(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool);
    let catalog = CatalogService::new(Arc::new(AppUnitOfWork::from_postgres(&db)));

    let older = catalog.create_movie(&draft("The Sacrifice", 1986)).await?;
    let newer = catalog.create_movie(&draft("Sacrifice 100%", 2020)).await?;
    catalog.create_movie(&draft("Ivan's Childhood", 1962)).await?;

    let hits = catalog.search_movies("sacrifice").await?;
    let ids: Vec<MovieId> = hits.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![newer, older]);

    let literal = catalog.search_movies("100%").await?;
    assert_eq!(literal.len(), 1);

    let media = catalog
        .add_media(
            older,
            &MediaUpdate {
                cover: Some("covers/sacrifice.jpg".into()),
                screenshots: vec!["shots/1.jpg".into(), "shots/2.jpg".into()],
            },
        )
        .await?;
    assert_eq!(media.cover.as_deref(), Some("covers/sacrifice.jpg"));
    assert_eq!(media.screenshots.len(), 2);

    catalog.remove_media(older, "shots/1.jpg").await?;
    catalog.remove_media(older, "covers/sacrifice.jpg").await?;
    let media = catalog.movie_media(older).await?;
    assert!(media.cover.is_none());
    assert_eq!(media.screenshots, vec!["shots/2.jpg".to_string()]);

    Ok(())
}

#[sqlx::test(
    migrator = "kinoteka_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("reference_data"))
)]
async fn recommendations_keep_position_order(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool);
    let solaris = db.movies().create(&draft("Solaris", 1972)).await?;
    let mirror = db.movies().create(&draft("Mirror", 1975)).await?;

    let late = db
        .recommendations()
        .create(&RecommendationDraft {
            movie_id: solaris,
            position: 5,
        })
        .await?;
    db.recommendations()
        .create(&RecommendationDraft {
            movie_id: mirror,
            position: 2,
        })
        .await?;

    let order: Vec<MovieId> = db
        .recommendations()
        .recommended_movies()
        .await?
        .iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(order, vec![mirror, solaris]);

    db.recommendations().update(late, 1).await?;
    let slots = db.recommendations().find_all().await?;
    assert_eq!(slots[0].movie_id, solaris);
    assert_eq!(db.recommendations().find_by_id(late).await?.position, 1);

    let err = db
        .recommendations()
        .create(&RecommendationDraft {
            movie_id: solaris,
            position: 3,
        })
        .await
        .expect_err("movie already recommended");
    assert!(matches!(err, CatalogError::Conflict(_)));

    db.recommendations().delete(late).await?;
    let err = db
        .recommendations()
        .delete(late)
        .await
        .expect_err("already deleted");
    assert!(matches!(err, CatalogError::NotFound(_)));

    Ok(())
}

#[sqlx::test(
    migrator = "kinoteka_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("reference_data"))
)]
async fn homepage_builds_shelves_per_category(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool);
    let catalog = CatalogService::new(Arc::new(AppUnitOfWork::from_postgres(&db)));

    let both = catalog.create_movie(&draft("Stalker", 1979)).await?;
    let mut trending_only = draft("Solaris", 1972);
    trending_only.category_ids = vec![CategoryId::new(1)];
    let solaris = catalog.create_movie(&trending_only).await?;
    catalog
        .create_recommendation(&RecommendationDraft {
            movie_id: solaris,
            position: 1,
        })
        .await?;

    let page = catalog.homepage().await?;
    assert_eq!(page.recommended.len(), 1);
    assert_eq!(page.recommended[0].id, solaris);

    let trending = page.shelf("Trending").expect("trending shelf");
    assert_eq!(trending.movies.len(), 2);
    let classics = page.shelf("Classics").expect("classics shelf");
    let ids: Vec<MovieId> = classics.movies.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![both]);
    assert_eq!(page.genres.len(), 3);
    assert_eq!(page.ages.len(), 3);

    let by_category = catalog.movies_by_category("2").await?;
    assert_eq!(by_category.len(), 1);
    let err = catalog
        .movies_by_category("classics")
        .await
        .expect_err("category id is not a number");
    assert!(err.is_malformed_parameter());

    Ok(())
}
