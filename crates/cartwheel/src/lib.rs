//! Cartwheel — client-side shopping cart state for a storefront.
//!
//! The cart lives in memory, mirrors every accepted mutation to a durable
//! key-value slot, and checks quantities against the remote catalog's stock
//! before accepting them. Failures never propagate to the caller: they are
//! converted into user-facing notices at the [`store::CartStore`] boundary.
//!
//! # Example
//!
//! ```rust,ignore
//! use cartwheel::config::CartConfig;
//! use cartwheel::models::ProductId;
//! use cartwheel::store::CartStore;
//!
//! let config = CartConfig::from_env()?;
//! let store = CartStore::open(&config).await?;
//!
//! store.add(ProductId::new(1)).await;
//! store.set_amount(ProductId::new(1), 3).await;
//! let cart = store.cart();
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod storage;
pub mod store;
