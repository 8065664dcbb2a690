//! Record shaping: raw catalog JSON to the normalized stored form.
//!
//! Shaping is pure. It builds absolute image URLs, copies whitelisted detail
//! fields when they are present, and trims the nested credit, video, and
//! recommendation lists to the subsets the API serves.

use serde_json::Value;

use crate::error::CoreError;
use crate::movie::{CastMember, CrewMember, MovieDetails, MovieRecord, Recommendation, Video};
use crate::raw::{RawCredits, RawMovie, RawRecommendation, RawResults, RawVideo};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Image host prefix; a size token and the raw path are appended.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

pub const POSTER_SIZE: &str = "w500";
pub const BACKDROP_SIZE: &str = "original";
/// Size used for cast/crew portraits and recommendation posters.
pub const THUMBNAIL_SIZE: &str = "w185";

/// Cast entries kept, in billing order.
pub const MAX_CAST: usize = 20;

/// Recommendations kept, in upstream order.
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Crew jobs worth surfacing. Matched case-sensitively.
pub const KEY_CREW_JOBS: &[&str] = &[
    "Director",
    "Writer",
    "Screenplay",
    "Producer",
    "Executive Producer",
];

pub const VIDEO_SITE: &str = "YouTube";
pub const VIDEO_TYPES: &[&str] = &["Trailer", "Teaser"];

// ---------------------------------------------------------------------------
// Shaping
// ---------------------------------------------------------------------------

/// Build an absolute image URL, or `None` when the raw path is missing or empty.
pub fn image_url(size: &str, path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{IMAGE_BASE_URL}{size}{p}"))
}

/// Shape one raw JSON record.
///
/// Fails with [`CoreError::MalformedRecord`] when `id` or `title` is missing
/// or a nested entry cannot be decoded; such records must not be stored.
pub fn shape(raw: &Value, include_details: bool) -> Result<MovieRecord, CoreError> {
    shape_movie(RawMovie::from_value(raw)?, include_details)
}

/// Shape an already-decoded record.
pub fn shape_movie(raw: RawMovie, include_details: bool) -> Result<MovieRecord, CoreError> {
    let catalog_id = raw
        .id
        .ok_or_else(|| CoreError::MalformedRecord("record has no `id`".to_string()))?;
    let title = raw.title.ok_or_else(|| {
        CoreError::MalformedRecord(format!("record {catalog_id} has no `title`"))
    })?;

    let details = if include_details {
        MovieDetails {
            genres: raw.genres,
            runtime: raw.runtime,
            budget: raw.budget,
            revenue: raw.revenue,
            status: raw.status,
            tagline: raw.tagline,
            external_id: raw.imdb_id,
            homepage: raw.homepage,
            production_companies: raw.production_companies,
            production_countries: raw.production_countries,
            spoken_languages: raw.spoken_languages,
            cast: raw.credits.as_ref().and_then(shape_cast),
            crew: raw.credits.as_ref().and_then(shape_crew),
            videos: raw.videos.and_then(shape_videos),
            recommendations: raw.recommendations.and_then(shape_recommendations),
        }
    } else {
        MovieDetails::default()
    };

    Ok(MovieRecord {
        catalog_id,
        title,
        overview: raw.overview.unwrap_or_default(),
        poster_url: image_url(POSTER_SIZE, raw.poster_path.as_deref()),
        backdrop_url: image_url(BACKDROP_SIZE, raw.backdrop_path.as_deref()),
        release_date: raw.release_date.unwrap_or_default(),
        vote_average: raw.vote_average.unwrap_or(0.0),
        vote_count: raw.vote_count.unwrap_or(0),
        popularity: raw.popularity.unwrap_or(0.0),
        original_language: raw.original_language.unwrap_or_default(),
        genre_ids: raw.genre_ids.unwrap_or_default(),
        details,
    })
}

fn shape_cast(credits: &RawCredits) -> Option<Vec<CastMember>> {
    let cast = credits.cast.as_ref()?;
    Some(
        cast.iter()
            .take(MAX_CAST)
            .enumerate()
            .map(|(position, person)| CastMember {
                person_id: person.id,
                name: person.name.clone().unwrap_or_default(),
                character: person.character.clone().unwrap_or_default(),
                profile_url: image_url(THUMBNAIL_SIZE, person.profile_path.as_deref()),
                order: person.order.unwrap_or(position as i32),
            })
            .collect(),
    )
}

fn shape_crew(credits: &RawCredits) -> Option<Vec<CrewMember>> {
    let crew = credits.crew.as_ref()?;
    Some(
        crew.iter()
            .filter_map(|person| {
                let job = person.job.as_deref()?;
                KEY_CREW_JOBS.contains(&job).then_some((person, job))
            })
            .map(|(person, job)| CrewMember {
                person_id: person.id,
                name: person.name.clone().unwrap_or_default(),
                job: job.to_string(),
                department: person.department.clone().unwrap_or_default(),
                profile_url: image_url(THUMBNAIL_SIZE, person.profile_path.as_deref()),
            })
            .collect(),
    )
}

fn shape_videos(videos: RawResults<RawVideo>) -> Option<Vec<Video>> {
    Some(
        videos
            .results?
            .into_iter()
            .filter_map(|v| {
                let site = v.site.filter(|s| s.as_str() == VIDEO_SITE)?;
                let kind = v.kind.filter(|k| VIDEO_TYPES.contains(&k.as_str()))?;
                Some(Video {
                    video_id: v.id,
                    key: v.key,
                    name: v.name.unwrap_or_default(),
                    site,
                    kind,
                    official: v.official.unwrap_or(true),
                })
            })
            .collect(),
    )
}

fn shape_recommendations(recs: RawResults<RawRecommendation>) -> Option<Vec<Recommendation>> {
    Some(
        recs.results?
            .into_iter()
            .take(MAX_RECOMMENDATIONS)
            .map(|m| Recommendation {
                catalog_id: m.id,
                title: m.title,
                poster_url: image_url(THUMBNAIL_SIZE, m.poster_path.as_deref()),
                vote_average: m.vote_average.unwrap_or(0.0),
            })
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn listing_record() -> Value {
        json!({
            "id": 603,
            "title": "The Matrix",
            "overview": "A hacker learns the truth.",
            "poster_path": "/abc.jpg",
            "backdrop_path": "/back.jpg",
            "release_date": "1999-03-30",
            "vote_average": 8.2,
            "vote_count": 25000,
            "popularity": 80.5,
            "original_language": "en",
            "genre_ids": [28, 878]
        })
    }

    #[test]
    fn builds_base_fields_and_urls() {
        let movie = shape(&listing_record(), false).unwrap();
        assert_eq!(movie.catalog_id, 603);
        assert_eq!(movie.title, "The Matrix");
        assert_eq!(movie.genre_ids, vec![28, 878]);
        assert!(movie.poster_url.as_deref().unwrap().ends_with("w500/abc.jpg"));
        assert_eq!(
            movie.backdrop_url.as_deref(),
            Some("https://image.tmdb.org/t/p/original/back.jpg")
        );
        assert!(movie.details.is_empty());
    }

    #[test]
    fn absent_or_empty_paths_give_no_url() {
        let movie = shape(&json!({ "id": 1, "title": "A" }), false).unwrap();
        assert_eq!(movie.poster_url, None);
        assert_eq!(movie.backdrop_url, None);

        let movie = shape(&json!({ "id": 1, "title": "A", "poster_path": "" }), false).unwrap();
        assert_eq!(movie.poster_url, None);
    }

    #[test]
    fn defaults_for_missing_scalars() {
        let movie = shape(&json!({ "id": 1, "title": "A" }), false).unwrap();
        assert_eq!(movie.overview, "");
        assert_eq!(movie.release_date, "");
        assert_eq!(movie.vote_average, 0.0);
        assert_eq!(movie.vote_count, 0);
        assert_eq!(movie.popularity, 0.0);
        assert!(movie.genre_ids.is_empty());
    }

    #[test]
    fn missing_id_or_title_is_malformed() {
        assert_matches!(
            shape(&json!({ "title": "No id" }), false),
            Err(CoreError::MalformedRecord(_))
        );
        assert_matches!(
            shape(&json!({ "id": 7 }), true),
            Err(CoreError::MalformedRecord(msg)) if msg.contains('7')
        );
    }

    #[test]
    fn listing_shape_ignores_detail_fields() {
        let mut raw = listing_record();
        raw["runtime"] = json!(136);
        raw["credits"] = json!({ "cast": [] });
        let movie = shape(&raw, false).unwrap();
        assert!(movie.details.is_empty());
    }

    #[test]
    fn detail_fields_are_sparse() {
        let mut raw = listing_record();
        raw["runtime"] = json!(136);
        raw["imdb_id"] = json!("tt0133093");
        raw["genres"] = json!([{ "id": 28, "name": "Action" }]);
        let movie = shape(&raw, true).unwrap();

        assert_eq!(movie.details.runtime, Some(Some(136)));
        assert_eq!(movie.details.external_id, Some(Some("tt0133093".to_string())));
        assert_eq!(movie.details.genres.as_ref().unwrap()[0].name, "Action");
        assert_eq!(movie.details.budget, None);
        assert_eq!(movie.details.cast, None);

        let json = serde_json::to_value(&movie).unwrap();
        assert!(json.get("budget").is_none());
    }

    #[test]
    fn null_detail_scalar_is_kept_as_a_clear() {
        let mut raw = listing_record();
        raw["tagline"] = Value::Null;
        let movie = shape(&raw, true).unwrap();

        assert_eq!(movie.details.tagline, Some(None));
        assert_eq!(movie.details.homepage, None);
        let json = serde_json::to_value(&movie).unwrap();
        assert!(json["tagline"].is_null());
        assert!(json.get("homepage").is_none());
    }

    #[test]
    fn null_strings_in_credits_and_videos_are_tolerated() {
        let mut raw = listing_record();
        raw["credits"] = json!({
            "cast": [{ "id": 1, "name": "Keanu", "character": null, "order": 0 }],
            "crew": [
                { "id": 2, "name": "Lana", "job": "Director", "department": null },
                { "id": 3, "name": "Anon", "job": null, "department": "Sound" }
            ]
        });
        raw["videos"] = json!({
            "results": [
                { "id": "a", "key": "k1", "name": null, "site": "YouTube", "type": "Trailer" },
                { "id": "b", "key": "k2", "name": "Trailer", "site": null, "type": "Trailer" },
                { "id": "c", "key": "k3", "name": "Teaser", "site": "YouTube", "type": null }
            ]
        });

        let details = shape(&raw, true).unwrap().details;
        let cast = details.cast.unwrap();
        assert_eq!(cast[0].character, "");
        let crew = details.crew.unwrap();
        assert_eq!(crew.len(), 1);
        assert_eq!(crew[0].department, "");
        let videos = details.videos.unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].video_id, "a");
        assert_eq!(videos[0].name, "");
    }

    #[test]
    fn cast_is_truncated_in_billing_order() {
        let cast: Vec<Value> = (0..30)
            .map(|i| {
                let profile = if i % 2 == 0 { json!("/p.jpg") } else { Value::Null };
                json!({
                    "id": 1000 + i,
                    "name": format!("Actor {i}"),
                    "character": format!("Role {i}"),
                    "profile_path": profile,
                    "order": i
                })
            })
            .collect();
        let mut raw = listing_record();
        raw["credits"] = json!({ "cast": cast });

        let movie = shape(&raw, true).unwrap();
        let cast = movie.details.cast.unwrap();
        assert_eq!(cast.len(), 20);
        assert!(cast.iter().enumerate().all(|(i, c)| c.order == i as i32));
        assert_eq!(cast[0].person_id, 1000);
        assert_eq!(
            cast[0].profile_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w185/p.jpg")
        );
        assert_eq!(cast[1].profile_url, None);
    }

    #[test]
    fn crew_is_filtered_to_key_jobs() {
        let mut raw = listing_record();
        raw["credits"] = json!({
            "crew": [
                { "id": 1, "name": "Lana", "job": "Director", "department": "Directing" },
                { "id": 2, "name": "Sam", "job": "Gaffer", "department": "Lighting" },
                { "id": 3, "name": "Joel", "job": "producer", "department": "Production" }
            ]
        });

        let crew = shape(&raw, true).unwrap().details.crew.unwrap();
        assert_eq!(crew.len(), 1);
        assert_eq!(crew[0].job, "Director");
        assert_eq!(crew[0].name, "Lana");
    }

    #[test]
    fn crew_has_no_count_cap() {
        let crew: Vec<Value> = (0..30)
            .map(|i| json!({ "id": i, "name": format!("Director {i}"), "job": "Director" }))
            .collect();
        let mut raw = listing_record();
        raw["credits"] = json!({ "crew": crew });

        let crew = shape(&raw, true).unwrap().details.crew.unwrap();
        assert_eq!(crew.len(), 30);
        assert_eq!(crew[29].person_id, 29);
    }

    #[test]
    fn videos_keep_youtube_trailers_and_teasers() {
        let mut raw = listing_record();
        raw["videos"] = json!({
            "results": [
                { "id": "a", "key": "k1", "name": "Trailer", "site": "YouTube", "type": "Trailer" },
                { "id": "b", "key": "k2", "name": "Teaser", "site": "YouTube", "type": "Teaser", "official": false },
                { "id": "c", "key": "k3", "name": "Clip", "site": "YouTube", "type": "Clip" },
                { "id": "d", "key": "k4", "name": "Trailer", "site": "Vimeo", "type": "Trailer" }
            ]
        });

        let videos = shape(&raw, true).unwrap().details.videos.unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].video_id, "a");
        assert!(videos[0].official);
        assert!(!videos[1].official);
    }

    #[test]
    fn recommendations_are_truncated() {
        let recs: Vec<Value> = (0..15)
            .map(|i| json!({ "id": i, "title": format!("Rec {i}"), "poster_path": "/r.jpg" }))
            .collect();
        let mut raw = listing_record();
        raw["recommendations"] = json!({ "results": recs });

        let recs = shape(&raw, true).unwrap().details.recommendations.unwrap();
        assert_eq!(recs.len(), 10);
        assert_eq!(recs[9].catalog_id, 9);
        assert_eq!(recs[0].vote_average, 0.0);
        assert!(recs[0].poster_url.as_deref().unwrap().ends_with("w185/r.jpg"));
    }

    #[test]
    fn shaping_is_deterministic() {
        let raw = listing_record();
        assert_eq!(shape(&raw, true).unwrap(), shape(&raw, true).unwrap());
    }
}
