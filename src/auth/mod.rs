// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Building blocks for JWT-controlled accounts.
//!
//! ## Auth Flow
//!
//! 1. The user signs in with an identity provider and obtains an RS256 ID
//!    token whose `sub` is their provider user id.
//! 2. The wallet packs the provider name, the raw header and payload JSON,
//!    and the token signature into the transaction's custom signature field
//!    ([`CustomAuthPayload`]).
//! 3. The account rebuilds `base64url(header).base64url(payload)`, checks
//!    `sub`, resolves the provider's key registry and verifies the signature
//!    with [`verify_rs256`].

pub mod error;
pub mod jwt;
pub mod payload;
pub mod rs256;

pub use error::ValidationError;
pub use jwt::{parse_claims, parse_header, signed_message, IdentityClaims, JwtHeader};
pub use payload::CustomAuthPayload;
pub use rs256::{verify_rs256, RSA_EXPONENT};
