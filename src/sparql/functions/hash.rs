//! Hash functions: MD5, SHA1, SHA256, SHA384, SHA512
//!
//! Each hashes the UTF-8 bytes of a simple or `xsd:string` literal and returns
//! the lowercase hex digest as a simple literal.

use crate::sparql::error::{FunctionError, FunctionResult};
use crate::sparql::value::ExprValue;
use md5::{Digest, Md5};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha1 => "SHA1",
            HashAlgorithm::Sha256 => "SHA256",
            HashAlgorithm::Sha384 => "SHA384",
            HashAlgorithm::Sha512 => "SHA512",
        }
    }

    fn hex_digest(&self, input: &[u8]) -> String {
        fn hex<D: Digest>(input: &[u8]) -> String {
            let mut hasher = D::new();
            hasher.update(input);
            hasher.finalize().iter().map(|b| format!("{:02x}", b)).collect()
        }
        match self {
            HashAlgorithm::Md5 => hex::<Md5>(input),
            HashAlgorithm::Sha1 => hex::<Sha1>(input),
            HashAlgorithm::Sha256 => hex::<Sha256>(input),
            HashAlgorithm::Sha384 => hex::<Sha384>(input),
            HashAlgorithm::Sha512 => hex::<Sha512>(input),
        }
    }
}

/// Hash a string argument; language-tagged literals are rejected
pub fn hash(value: &ExprValue, algorithm: HashAlgorithm) -> FunctionResult<ExprValue> {
    let arg = value.string_arg(algorithm.name())?;
    if arg.language.is_some() {
        return Err(FunctionError::Argument(format!(
            "{} expects a string without language tag, got {}",
            algorithm.name(),
            value
        )));
    }
    ExprValue::simple(algorithm.hex_digest(arg.value.as_bytes()))
}

pub fn md5(value: &ExprValue) -> FunctionResult<ExprValue> {
    hash(value, HashAlgorithm::Md5)
}

pub fn sha1(value: &ExprValue) -> FunctionResult<ExprValue> {
    hash(value, HashAlgorithm::Sha1)
}

pub fn sha256(value: &ExprValue) -> FunctionResult<ExprValue> {
    hash(value, HashAlgorithm::Sha256)
}

pub fn sha384(value: &ExprValue) -> FunctionResult<ExprValue> {
    hash(value, HashAlgorithm::Sha384)
}

pub fn sha512(value: &ExprValue) -> FunctionResult<ExprValue> {
    hash(value, HashAlgorithm::Sha512)
}
