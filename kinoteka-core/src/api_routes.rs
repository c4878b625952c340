macro_rules! v1_path {
    ($path:literal) => {
        concat!("/api/v1", $path)
    };
}

/// Versioned API route definitions shared by the server and its clients
pub mod v1 {
    pub const ROOT: &str = "/api/v1";
    pub const VERSION: &str = "v1";

    pub mod movies {
        pub const COLLECTION: &str = v1_path!("/movies");
        pub const ITEM: &str = v1_path!("/movies/{id}");
        pub const MEDIA: &str = v1_path!("/movies/{id}/media");

        pub mod seasons {
            pub const COLLECTION: &str = v1_path!("/movies/{id}/seasons");
            pub const ITEM: &str =
                v1_path!("/movies/{id}/seasons/{season_id}");
            pub const EPISODES: &str =
                v1_path!("/movies/{id}/seasons/{season_id}/episodes");
            pub const EPISODE: &str = v1_path!(
                "/movies/{id}/seasons/{season_id}/episodes/{episode_id}"
            );
        }
    }

    pub mod genres {
        pub const COLLECTION: &str = v1_path!("/genres");
        pub const ITEM: &str = v1_path!("/genres/{id}");
    }

    pub mod categories {
        pub const COLLECTION: &str = v1_path!("/categories");
        pub const ITEM: &str = v1_path!("/categories/{id}");
    }

    pub mod ages {
        pub const COLLECTION: &str = v1_path!("/ages");
        pub const ITEM: &str = v1_path!("/ages/{id}");
    }

    pub mod movie_types {
        pub const COLLECTION: &str = v1_path!("/movie-types");
        pub const ITEM: &str = v1_path!("/movie-types/{id}");
    }

    pub mod recommendations {
        pub const COLLECTION: &str = v1_path!("/recommendations");
        pub const ITEM: &str = v1_path!("/recommendations/{id}");
    }

    pub const HOMEPAGE: &str = v1_path!("/homepage");

    pub mod search {
        pub const MOVIES: &str = v1_path!("/search");
        pub const BY_CATEGORY: &str = v1_path!("/search/{category_id}");
    }
}

pub const HEALTH: &str = "/health";

/// Substitute `{param}` segments of `template` with `values`, in order.
pub fn resolve(template: &str, values: &[i32]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut values = values.iter();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        match values.next() {
            Some(value) => out.push_str(&value.to_string()),
            None => out.push_str(&rest[start..=start + len]),
        }
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);
    out
}
