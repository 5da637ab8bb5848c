//! Demo catalog data
//!
//! Replaces the catalog contents with a small, fixed data set used for local
//! development and dashboard demos, plus two demo user accounts. Runs in one
//! transaction.

use crate::Result;
use sqlx::SqlitePool;
use tracing::info;

const COVER_STAGE: &str = "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?w=400&h=400&fit=crop";
const COVER_CROWD: &str = "https://images.unsplash.com/photo-1514320291840-2e0a9bf2a9ae?w=400&h=400&fit=crop";

/// Placeholder bcrypt hash; demo accounts cannot log in
const DEMO_PASSWORD_HASH: &str = "$2a$10$rOzJqQZQZQZQZQZQZQZQZOzJqQZQZQZQZQZQZQZQZOzJqQZQZQZQZ";

struct SeedUser {
    id: &'static str,
    email: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    role: &'static str,
}

struct SeedPublisher {
    id: &'static str,
    name: &'static str,
    kind: &'static str,
    location: &'static str,
    email: &'static str,
    website: &'static str,
    logo_url: &'static str,
    founded_year: i64,
}

struct SeedLabel {
    id: &'static str,
    name: &'static str,
    kind: &'static str,
    publisher_id: &'static str,
    location: &'static str,
    founded_year: i64,
    logo_url: &'static str,
    genres: &'static [&'static str],
}

struct SeedArtist {
    id: &'static str,
    name: &'static str,
    stage_name: &'static str,
    email: &'static str,
    birth_date: &'static str,
    genres: &'static [&'static str],
    bio: &'static str,
    image_url: &'static str,
    instagram: &'static str,
    spotify: &'static str,
}

struct SeedRecording {
    id: &'static str,
    title: &'static str,
    artist_id: &'static str,
    album: &'static str,
    duration: i64,
    recorded_date: &'static str,
    genre: &'static str,
    bpm: i64,
    key_signature: &'static str,
    status: &'static str,
    cover_url: &'static str,
}

struct SeedRelease {
    id: &'static str,
    title: &'static str,
    artist_id: &'static str,
    label_id: &'static str,
    kind: &'static str,
    release_date: &'static str,
    total_duration: i64,
    track_count: i64,
    genres: &'static [&'static str],
    platforms: &'static [&'static str],
    status: &'static str,
    upc: &'static str,
    catalog_number: &'static str,
    cover_url: &'static str,
}

const USERS: &[SeedUser] = &[
    SeedUser {
        id: "550e8400-e29b-41d4-a716-446655440001",
        email: "admin@soundvault.com",
        first_name: "Alex",
        last_name: "Johnson",
        role: "admin",
    },
    SeedUser {
        id: "550e8400-e29b-41d4-a716-446655440002",
        email: "manager@soundvault.com",
        first_name: "Sarah",
        last_name: "Williams",
        role: "manager",
    },
];

const PUBLISHERS: &[SeedPublisher] = &[
    SeedPublisher {
        id: "550e8400-e29b-41d4-a716-446655440010",
        name: "Stellar Music Publishing",
        kind: "Major Label",
        location: "Los Angeles, CA",
        email: "contact@stellarmusic.com",
        website: "stellarmusic.com",
        logo_url: COVER_STAGE,
        founded_year: 1995,
    },
    SeedPublisher {
        id: "550e8400-e29b-41d4-a716-446655440011",
        name: "Urban Sounds Publishing",
        kind: "Independent",
        location: "Atlanta, GA",
        email: "info@urbansounds.com",
        website: "urbansounds.com",
        logo_url: COVER_CROWD,
        founded_year: 2008,
    },
    SeedPublisher {
        id: "550e8400-e29b-41d4-a716-446655440012",
        name: "Indie Collective",
        kind: "Boutique",
        location: "Nashville, TN",
        email: "hello@indiecollective.com",
        website: "indiecollective.com",
        logo_url: COVER_STAGE,
        founded_year: 2015,
    },
];

const LABELS: &[SeedLabel] = &[
    SeedLabel {
        id: "550e8400-e29b-41d4-a716-446655440020",
        name: "Stellar Records",
        kind: "Major Label",
        publisher_id: "550e8400-e29b-41d4-a716-446655440010",
        location: "Los Angeles, CA",
        founded_year: 1995,
        logo_url: COVER_STAGE,
        genres: &["Pop", "Rock", "Electronic"],
    },
    SeedLabel {
        id: "550e8400-e29b-41d4-a716-446655440021",
        name: "Urban Vibes",
        kind: "Independent",
        publisher_id: "550e8400-e29b-41d4-a716-446655440011",
        location: "Atlanta, GA",
        founded_year: 2008,
        logo_url: COVER_CROWD,
        genres: &["Hip-Hop", "R&B", "Trap"],
    },
    SeedLabel {
        id: "550e8400-e29b-41d4-a716-446655440022",
        name: "Indie Dreams",
        kind: "Boutique",
        publisher_id: "550e8400-e29b-41d4-a716-446655440012",
        location: "Nashville, TN",
        founded_year: 2015,
        logo_url: COVER_STAGE,
        genres: &["Indie", "Folk", "Alternative"],
    },
];

const ARTISTS: &[SeedArtist] = &[
    SeedArtist {
        id: "550e8400-e29b-41d4-a716-446655440030",
        name: "Luna Rodriguez",
        stage_name: "Luna",
        email: "luna@example.com",
        birth_date: "1995-03-15",
        genres: &["Pop", "Electronic"],
        bio: "Rising pop star with electronic influences",
        image_url: "https://images.unsplash.com/photo-1494790108755-2616c9c0e8e5?w=400&h=400&fit=crop&crop=face",
        instagram: "@lunamusic",
        spotify: "Luna Rodriguez",
    },
    SeedArtist {
        id: "550e8400-e29b-41d4-a716-446655440031",
        name: "Marcus Chen",
        stage_name: "MC Marcus",
        email: "marcus@example.com",
        birth_date: "1992-08-22",
        genres: &["Hip-Hop", "Rap"],
        bio: "Hip-hop artist from Atlanta with powerful lyrics",
        image_url: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400&h=400&fit=crop&crop=face",
        instagram: "@mcmarcus",
        spotify: "MC Marcus",
    },
    SeedArtist {
        id: "550e8400-e29b-41d4-a716-446655440032",
        name: "Aria Thompson",
        stage_name: "Aria",
        email: "aria@example.com",
        birth_date: "1998-12-05",
        genres: &["Indie", "Folk"],
        bio: "Indie folk singer-songwriter from Nashville",
        image_url: "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=400&h=400&fit=crop&crop=face",
        instagram: "@ariasounds",
        spotify: "Aria Thompson",
    },
    SeedArtist {
        id: "550e8400-e29b-41d4-a716-446655440033",
        name: "Phoenix Williams",
        stage_name: "DJ Phoenix",
        email: "phoenix@example.com",
        birth_date: "1990-06-18",
        genres: &["Electronic", "EDM", "House"],
        bio: "Electronic music producer and DJ",
        image_url: "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=400&h=400&fit=crop&crop=face",
        instagram: "@djphoenix",
        spotify: "DJ Phoenix",
    },
];

const RECORDINGS: &[SeedRecording] = &[
    SeedRecording {
        id: "550e8400-e29b-41d4-a716-446655440040",
        title: "Midnight Dreams",
        artist_id: "550e8400-e29b-41d4-a716-446655440030",
        album: "Neon Nights",
        duration: 210,
        recorded_date: "2023-06-15",
        genre: "Pop",
        bpm: 120,
        key_signature: "C Major",
        status: "mastered",
        cover_url: COVER_STAGE,
    },
    SeedRecording {
        id: "550e8400-e29b-41d4-a716-446655440041",
        title: "Street Symphony",
        artist_id: "550e8400-e29b-41d4-a716-446655440031",
        album: "Urban Tales",
        duration: 195,
        recorded_date: "2023-07-20",
        genre: "Hip-Hop",
        bpm: 95,
        key_signature: "G Minor",
        status: "mastered",
        cover_url: COVER_CROWD,
    },
    SeedRecording {
        id: "550e8400-e29b-41d4-a716-446655440042",
        title: "Whispered Secrets",
        artist_id: "550e8400-e29b-41d4-a716-446655440032",
        album: "Mountain High",
        duration: 245,
        recorded_date: "2023-05-10",
        genre: "Indie",
        bpm: 85,
        key_signature: "D Major",
        status: "recording",
        cover_url: COVER_STAGE,
    },
    SeedRecording {
        id: "550e8400-e29b-41d4-a716-446655440043",
        title: "Neon Nights",
        artist_id: "550e8400-e29b-41d4-a716-446655440033",
        album: "Electric Dreams",
        duration: 320,
        recorded_date: "2023-08-05",
        genre: "Electronic",
        bpm: 128,
        key_signature: "A Minor",
        status: "mastered",
        cover_url: COVER_CROWD,
    },
];

const RELEASES: &[SeedRelease] = &[
    SeedRelease {
        id: "550e8400-e29b-41d4-a716-446655440050",
        title: "Neon Nights",
        artist_id: "550e8400-e29b-41d4-a716-446655440030",
        label_id: "550e8400-e29b-41d4-a716-446655440020",
        kind: "Album",
        release_date: "2023-09-15",
        total_duration: 2520,
        track_count: 12,
        genres: &["Pop", "Electronic"],
        platforms: &["Spotify", "Apple Music", "YouTube Music", "Amazon Music"],
        status: "released",
        upc: "123456789012",
        catalog_number: "STL001",
        cover_url: COVER_STAGE,
    },
    SeedRelease {
        id: "550e8400-e29b-41d4-a716-446655440051",
        title: "Urban Tales",
        artist_id: "550e8400-e29b-41d4-a716-446655440031",
        label_id: "550e8400-e29b-41d4-a716-446655440021",
        kind: "EP",
        release_date: "2023-10-01",
        total_duration: 1170,
        track_count: 6,
        genres: &["Hip-Hop", "Rap"],
        platforms: &["Spotify", "Apple Music", "SoundCloud"],
        status: "released",
        upc: "123456789013",
        catalog_number: "URB001",
        cover_url: COVER_CROWD,
    },
    SeedRelease {
        id: "550e8400-e29b-41d4-a716-446655440052",
        title: "Mountain High",
        artist_id: "550e8400-e29b-41d4-a716-446655440032",
        label_id: "550e8400-e29b-41d4-a716-446655440022",
        kind: "Single",
        release_date: "2023-11-15",
        total_duration: 245,
        track_count: 1,
        genres: &["Indie", "Folk"],
        platforms: &["Spotify", "Bandcamp"],
        status: "pre-release",
        upc: "123456789014",
        catalog_number: "IND001",
        cover_url: COVER_STAGE,
    },
];

/// Row counts written by [`seed_demo_catalog`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub publishers: usize,
    pub labels: usize,
    pub artists: usize,
    pub recordings: usize,
    pub releases: usize,
}

/// Clear the catalog tables and insert the demo data set
pub async fn seed_demo_catalog(pool: &SqlitePool) -> Result<SeedSummary> {
    let mut tx = pool.begin().await?;

    // Children first so foreign keys never dangle mid-way
    for table in [
        "analytics",
        "royalties",
        "release_tracks",
        "releases",
        "recordings",
        "artists",
        "labels",
        "publishers",
        "users",
    ] {
        sqlx::query(&format!("DELETE FROM {}", table))
            .execute(&mut *tx)
            .await?;
    }

    for u in USERS {
        sqlx::query(
            "INSERT INTO users (id, email, password_hash, first_name, last_name, role)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(u.id)
        .bind(u.email)
        .bind(DEMO_PASSWORD_HASH)
        .bind(u.first_name)
        .bind(u.last_name)
        .bind(u.role)
        .execute(&mut *tx)
        .await?;
    }

    for p in PUBLISHERS {
        sqlx::query(
            "INSERT INTO publishers (id, name, type, location, email, website, logo_url, founded_year)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(p.id)
        .bind(p.name)
        .bind(p.kind)
        .bind(p.location)
        .bind(p.email)
        .bind(p.website)
        .bind(p.logo_url)
        .bind(p.founded_year)
        .execute(&mut *tx)
        .await?;
    }

    for l in LABELS {
        sqlx::query(
            "INSERT INTO labels (id, name, type, publisher_id, location, founded_year, logo_url, genres, status)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'active')",
        )
        .bind(l.id)
        .bind(l.name)
        .bind(l.kind)
        .bind(l.publisher_id)
        .bind(l.location)
        .bind(l.founded_year)
        .bind(l.logo_url)
        .bind(serde_json::to_string(l.genres)?)
        .execute(&mut *tx)
        .await?;
    }

    for a in ARTISTS {
        let social_media = serde_json::json!({ "instagram": a.instagram, "spotify": a.spotify });
        sqlx::query(
            "INSERT INTO artists (id, name, stage_name, email, birth_date, nationality, genres, bio, image_url, social_media)
             VALUES (?, ?, ?, ?, ?, 'American', ?, ?, ?, ?)",
        )
        .bind(a.id)
        .bind(a.name)
        .bind(a.stage_name)
        .bind(a.email)
        .bind(a.birth_date)
        .bind(serde_json::to_string(a.genres)?)
        .bind(a.bio)
        .bind(a.image_url)
        .bind(social_media.to_string())
        .execute(&mut *tx)
        .await?;
    }

    for r in RECORDINGS {
        sqlx::query(
            "INSERT INTO recordings (id, title, artist_id, album, duration, recorded_date, genre, bpm, key_signature, status, cover_url)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(r.id)
        .bind(r.title)
        .bind(r.artist_id)
        .bind(r.album)
        .bind(r.duration)
        .bind(r.recorded_date)
        .bind(r.genre)
        .bind(r.bpm)
        .bind(r.key_signature)
        .bind(r.status)
        .bind(r.cover_url)
        .execute(&mut *tx)
        .await?;
    }

    for r in RELEASES {
        sqlx::query(
            "INSERT INTO releases (id, title, artist_id, label_id, type, release_date, total_duration,
                                   track_count, cover_url, genres, platforms, status, upc, catalog_number)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(r.id)
        .bind(r.title)
        .bind(r.artist_id)
        .bind(r.label_id)
        .bind(r.kind)
        .bind(r.release_date)
        .bind(r.total_duration)
        .bind(r.track_count)
        .bind(r.cover_url)
        .bind(serde_json::to_string(r.genres)?)
        .bind(serde_json::to_string(r.platforms)?)
        .bind(r.status)
        .bind(r.upc)
        .bind(r.catalog_number)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    let summary = SeedSummary {
        users: USERS.len(),
        publishers: PUBLISHERS.len(),
        labels: LABELS.len(),
        artists: ARTISTS.len(),
        recordings: RECORDINGS.len(),
        releases: RELEASES.len(),
    };
    info!(?summary, "Demo catalog seeded");

    Ok(summary)
}
