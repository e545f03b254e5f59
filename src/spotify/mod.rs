//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used to resolve
//! track metadata. It handles authentication, catalog data retrieval, error
//! handling, and rate limiting, and serves as the metadata source of truth
//! for the download pipeline — no audio ever comes from Spotify itself.
//!
//! ## Overview
//!
//! Spdl only reads public catalog data: tracks, albums and playlists. That
//! makes the OAuth client-credentials grant sufficient — there is no user
//! login, no browser round-trip and no refresh token. The module exchanges
//! the configured client ID/secret for an application token and uses it as a
//! bearer token on plain GET requests.
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer (URL dispatch)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (client-credentials grant)
//!     └── Catalog Fetchers (tracks, albums, playlists)
//!          ↓
//! Disk Cache ←→ HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Implements the OAuth 2.0 client-credentials flow:
//! - **Token Exchange**: Swaps client ID/secret for an application token
//! - **Expiry Stamping**: Records the absolute expiry time at fetch time
//! - **No User Interaction**: Public catalog data needs no user consent
//!
//! Token caching and expiry checks live in the management layer
//! (`CredentialsManager`); this module only performs the network exchange.
//!
//! ### Catalog Module
//!
//! [`tracks`] - Cache-first fetchers for the three reference kinds:
//! - **Tracks**: `/tracks/{id}` with the embedded album and cover images
//! - **Albums**: `/albums/{id}` including the full track listing
//! - **Playlists**: `/playlists/{id}` including item tracks
//!
//! Every successful response is cached wholesale on disk, so repeated runs
//! against the same reference never touch the network for metadata.
//!
//! ## Error Handling
//!
//! - **Rate Limiting**: 429 responses respect the `Retry-After` header and
//!   retry automatically, with a warning for visibility
//! - **Transient Errors**: 502 Bad Gateway retries after a fixed delay
//! - **Hard Failures**: other non-success statuses and network errors are
//!   returned as `Err(String)` with remediation hints where useful

pub mod auth;
pub mod tracks;
