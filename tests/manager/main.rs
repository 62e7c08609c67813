//! Parameter manager integration tests
//!
//! Exercises the manager through the public facade only.
//!
//! ## Test Categories
//!
//! 1. **Scenarios** - End-to-end register/bind/read/write/update flows
//! 2. **Lifecycle** - Uninitialized vs ready, destructive re-init
//! 3. **Routing** - Storage-location encoding and driver resolution
//! 4. **Concurrency** - Many threads sharing one manager
//! 5. **Configuration** - Initializing from `paramstore.toml`
//!
//! ```bash
//! cargo test --test manager
//! ```

#[path = "../common/mod.rs"]
mod common;

mod lifecycle;
mod routing;
mod scenarios;
