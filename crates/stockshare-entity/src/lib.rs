//! # stockshare-entity
//!
//! Domain records stored by StockShare: merchants ([`user`]), their
//! catalog ([`product`]), and the public share tokens that expose it
//! ([`share`]).

pub mod product;
pub mod share;
pub mod user;
