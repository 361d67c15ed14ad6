//! Domain primitives, ports, and service facades.
//!
//! Purpose: Define strongly typed read models for records served by the API
//! and the thin services that fetch them. Types are immutable snapshots of the
//! server state at fetch time; the client never mutates them.
//!
//! Public surface:
//! - Unit, UnitStatus, NewUnit, UnitChanges: unit read model and write DTOs.
//! - User, Role, NewUser: user read model and write DTO.
//! - UnitId, BuildingId, UserId: validated path-safe identifiers.
//! - Palette, TrafficLight: declarative UI colour data.
//! - UnitsService, UsersService: typed facades over the `ApiClient` port.

mod identifiers;
pub mod ports;
pub mod theme;
pub mod unit;
mod units_service;
pub mod user;
mod users_service;

pub use self::identifiers::{BuildingId, IdentifierError, UnitId, UserId};
pub use self::theme::{HexColor, PALETTE, Palette, TrafficLight, TrafficLightError};
pub use self::unit::{NewUnit, Unit, UnitChanges, UnitStatus};
pub use self::units_service::UnitsService;
pub use self::user::{NewUser, NewUserError, Role, UnknownRoleError, User};
pub use self::users_service::UsersService;
