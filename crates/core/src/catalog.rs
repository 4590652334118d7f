//! Static catalog vocabulary: entry kinds, viewing platforms and the
//! kind-dependent genre lists.
//!
//! These values are stored verbatim in the `titles` table and must match the
//! `CHECK` constraints in the initial migration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

/// Whether an entry is a single film or an episodic series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Movie,
    Series,
}

impl Kind {
    pub const ALL: [Kind; 2] = [Kind::Movie, Kind::Series];

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Movie => "movie",
            Kind::Series => "series",
        }
    }

    /// The genre vocabulary permitted for this kind.
    pub fn genres(self) -> &'static [&'static str] {
        match self {
            Kind::Movie => MOVIE_GENRES,
            Kind::Series => SERIES_GENRES,
        }
    }

    pub fn allows_genre(self, genre: &str) -> bool {
        self.genres().contains(&genre)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(Kind::Movie),
            "series" => Ok(Kind::Series),
            other => Err(CoreError::InvalidKind(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Platforms
// ---------------------------------------------------------------------------

/// Every platform an entry can be watched on.
pub const PLATFORMS: &[&str] = &[
    "APPLE TV",
    "DISNEY+",
    "HBO",
    "MUBI",
    "NETFLIX",
    "NO DISPONIBLE",
    "PARAMOUNT",
    "PRIMEVIDEO",
    "SALA DE CINE",
    "YOUTUBE PREMIUM",
];

/// Validate that a platform is one of [`PLATFORMS`]. Matching is exact.
pub fn validate_platform(platform: &str) -> Result<(), CoreError> {
    if PLATFORMS.contains(&platform) {
        Ok(())
    } else {
        Err(CoreError::InvalidPlatform(platform.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Genres
// ---------------------------------------------------------------------------

pub const MOVIE_GENRES: &[&str] = &[
    "Acción",
    "Animación",
    "Aventura",
    "Bélico",
    "Biográfico",
    "Ciencia Ficción",
    "Cine Negro",
    "Comedia",
    "Comedia Drámatica",
    "Comedia Negra",
    "Deportivo",
    "Documental",
    "Drama",
    "Fantasía",
    "Histórico",
    "Misterio",
    "Musical",
    "Policial",
    "Romance",
    "Suspenso",
    "Terror",
    "Western",
];

pub const SERIES_GENRES: &[&str] = &[
    "Animación",
    "Antológica",
    "Ciencia Ficción",
    "Comedia",
    "Comedia Drámatica",
    "Crimen",
    "Documental",
    "Drama",
    "Drama Juvenil",
    "Espionaje",
    "Fantasía",
    "Histórico",
    "Médico",
    "Misterio",
    "Policíaco",
    "Reality Show",
    "Romance",
    "Sitcom",
    "Superhéroes",
    "Terror",
    "Thriller",
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
