//! # FitX API
//!
//! HTTP surface for the FitX size engine.
//!
//! | Method | Path              | Description                          |
//! |--------|-------------------|--------------------------------------|
//! | POST   | `/size/compare`   | Size comparison across products      |
//! | GET    | `/brands`         | Brands in the size-chart registry    |
//! | GET    | `/brands/{name}`  | One brand's size chart               |
//! | GET    | `/health`         | Liveness check                       |

pub mod rest;

pub use rest::RestApi;
