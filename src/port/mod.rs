//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the application services and storage.
//! The SQLite adapter implements them; tests may substitute their own.
//!
//! ```text
//!     ┌──────────────┐        ┌──────────────────┐        ┌──────────────┐
//!     │  CLI adapter │ ─────▶ │ Application      │ ─────▶ │ Port traits  │
//!     └──────────────┘        │ (catalog,        │        └──────┬───────┘
//!                             │  dashboard,      │               │
//!                             │  insights)       │               ▼
//!                             └──────────────────┘        ┌──────────────┐
//!                                                         │ SQLite       │
//!                                                         │ adapter      │
//!                                                         └──────────────┘
//! ```

pub mod outbound;
