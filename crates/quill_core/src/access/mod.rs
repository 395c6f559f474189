//! Authorization policy.
//!
//! Declaration-only: the table answers "may this role do that", and the
//! surrounding UI enforces the answer.

pub mod policy;
