//! Size-prefixed wire buffers
//!
//! [`Tpm2b`] is the generic form of the TPM2B structures: a 16-bit
//! big-endian length followed by that many content bytes, stored in a fixed
//! array of capacity `N`. Contents are wiped on drop since the same type
//! carries private scalars and shared secrets.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};
use crate::ids::{HashAlg, SigScheme};
use tpm2crypt_params::traditional::ecc::MAX_ECC_KEY_BYTES;
use tpm2crypt_params::traditional::rsa::MAX_RSA_KEY_BYTES;

/// Fixed-capacity, length-prefixed byte buffer
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Tpm2b<const N: usize> {
    size: usize,
    buffer: [u8; N],
}

impl<const N: usize> Tpm2b<N> {
    /// Largest content this buffer can hold
    pub const CAPACITY: usize = N;

    /// An empty buffer
    pub fn new() -> Self {
        Self {
            size: 0,
            buffer: [0u8; N],
        }
    }

    /// Copy `data` into a new buffer; fails with `Size` if it does not fit
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let mut out = Self::new();
        out.set(data)?;
        Ok(out)
    }

    /// Replace the contents with `data`
    pub fn set(&mut self, data: &[u8]) -> Result<()> {
        if data.len() > N {
            return Err(Error::Size);
        }
        self.buffer.zeroize();
        self.buffer[..data.len()].copy_from_slice(data);
        self.size = data.len();
        Ok(())
    }

    /// Number of content bytes
    pub fn len(&self) -> usize {
        self.size
    }

    /// True when no content bytes are present
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Content bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer[..self.size]
    }

    /// Append the wire form (size then content) to `out`
    pub fn marshal(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&(self.size as u16).to_be_bytes());
        out.extend_from_slice(self.as_slice());
    }

    /// Parse the wire form from the front of `input`, returning the buffer
    /// and the number of bytes consumed
    pub fn unmarshal(input: &[u8]) -> Result<(Self, usize)> {
        if input.len() < 2 {
            return Err(Error::Size);
        }
        let size = u16::from_be_bytes([input[0], input[1]]) as usize;
        if size > N || input.len() < 2 + size {
            return Err(Error::Size);
        }
        let out = Self::from_slice(&input[2..2 + size])?;
        Ok((out, 2 + size))
    }
}

impl<const N: usize> Default for Tpm2b<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PartialEq for Tpm2b<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<const N: usize> Eq for Tpm2b<N> {}

impl<const N: usize> AsRef<[u8]> for Tpm2b<N> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl<const N: usize> fmt::Debug for Tpm2b<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tpm2b<{}>(", N)?;
        for b in self.as_slice() {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}

/// An ECC coordinate or scalar (TPM2B_ECC_PARAMETER)
pub type EccParameter = Tpm2b<MAX_ECC_KEY_BYTES>;

/// An RSA modulus-sized buffer (TPM2B_PUBLIC_KEY_RSA)
pub type RsaBuffer = Tpm2b<MAX_RSA_KEY_BYTES>;

/// Affine ECC point (TPMS_ECC_POINT)
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct EccPoint {
    /// x coordinate
    pub x: EccParameter,
    /// y coordinate
    pub y: EccParameter,
}

impl EccPoint {
    /// Build from coordinate bytes
    pub fn from_coordinates(x: &[u8], y: &[u8]) -> Result<Self> {
        Ok(Self {
            x: EccParameter::from_slice(x)?,
            y: EccParameter::from_slice(y)?,
        })
    }

    /// Append the wire form (TPM2B x, TPM2B y) to `out`
    pub fn marshal(&self, out: &mut Vec<u8>) {
        self.x.marshal(out);
        self.y.marshal(out);
    }

    /// Parse the wire form from the front of `input`
    pub fn unmarshal(input: &[u8]) -> Result<(Self, usize)> {
        let (x, used_x) = EccParameter::unmarshal(input)?;
        let (y, used_y) = EccParameter::unmarshal(&input[used_x..])?;
        Ok((Self { x, y }, used_x + used_y))
    }
}

/// ECC signature (TPMS_SIGNATURE_ECC)
///
/// For ECDAA, `r` carries the TPM nonce rather than a curve-derived value.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EccSignature {
    /// Scheme that produced the signature
    pub scheme: SigScheme,
    /// Hash used for the digest
    pub hash: HashAlg,
    /// First component
    pub r: EccParameter,
    /// Second component
    pub s: EccParameter,
}
