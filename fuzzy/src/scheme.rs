//! The fuzzy commitment scheme.

use bch::{Bch, Codec};
use rand::{CryptoRng, Rng};
use sha2::{Digest, Sha256};
use subtle::{Choice, ConstantTimeEq};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::bits::BitString;
use crate::commitment::Commitment;
use crate::constants::PSEUDONYM_SIZE;
use crate::errors::FcsError;
use crate::extractor::{ByteExtractor, Extractor};
use crate::params::FcsParams;

/// Fuzzy commitment scheme after Juels and Wattenberg.
///
/// A message is encoded with a `t`-error-correcting code and the codeword is
/// masked with the witness. Any witness within `t` bit flips of the committed
/// one unmasks a codeword close enough to decode, and the recovered message is
/// checked against the SHA-256 pseudonym.
///
/// The scheme holds no state beyond its parameters, so a single instance can
/// serve concurrent `commit` and `open` calls.
///
/// # Example
///
/// ```
/// use fuzzy::{FcsParams, FuzzyCommitmentScheme};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let scheme = FuzzyCommitmentScheme::new(FcsParams::new(256, 2)).expect("scheme");
///
/// let witness = [0x5au8; 32];
/// let commitment = scheme.commit(&mut rng, &witness, None).expect("commit");
///
/// let mut noisy = witness;
/// noisy[3] ^= 0x01;
/// noisy[17] ^= 0x80;
/// assert!(scheme.verify(&commitment, &noisy).expect("verify"));
/// ```
#[derive(Clone, Debug)]
pub struct FuzzyCommitmentScheme<X = ByteExtractor, C = Bch> {
    params: FcsParams,
    extractor: X,
    codec: C,
}

impl FuzzyCommitmentScheme {
    /// Builds a scheme with the default byte extractor and a BCH code.
    pub fn new(params: FcsParams) -> Result<Self, FcsError> {
        Self::with_extractor(params, ByteExtractor)
    }
}

impl<X> FuzzyCommitmentScheme<X, Bch> {
    /// Builds a scheme with a custom extractor and a BCH code.
    pub fn with_extractor(params: FcsParams, extractor: X) -> Result<Self, FcsError> {
        params.validate()?;
        let codec = Bch::new(params.tolerance)?;
        Self::with_codec(params, extractor, codec)
    }
}

impl<X, C: Codec> FuzzyCommitmentScheme<X, C> {
    /// Builds a scheme from an explicit extractor and codec.
    ///
    /// The codec must correct exactly `params.tolerance` errors and hold a
    /// message of `params.message_bytes()` bytes.
    pub fn with_codec(params: FcsParams, extractor: X, codec: C) -> Result<Self, FcsError> {
        params.validate()?;
        if codec.tolerance() != params.tolerance {
            return Err(FcsError::InvalidParams(format!(
                "codec corrects {} errors, parameters ask for {}",
                codec.tolerance(),
                params.tolerance
            )));
        }
        if params.message_bytes() > codec.max_data_bytes() {
            return Err(FcsError::InvalidParams(format!(
                "a {}-bit witness does not fit next to {} parity bits",
                params.witness_bits,
                codec.ecc_bits()
            )));
        }

        debug!(
            witness_bits = params.witness_bits,
            tolerance = params.tolerance,
            ecc_bits = codec.ecc_bits(),
            "fuzzy commitment scheme ready"
        );
        Ok(Self {
            params,
            extractor,
            codec,
        })
    }

    pub fn params(&self) -> &FcsParams {
        &self.params
    }

    /// Maximum witness length `k` in bits.
    pub fn witness_bits(&self) -> usize {
        self.params.witness_bits
    }

    /// Tolerated bit errors `t`.
    pub fn tolerance(&self) -> usize {
        self.params.tolerance
    }

    /// Parity bits added by the codec.
    pub fn ecc_bits(&self) -> usize {
        self.codec.ecc_bits()
    }

    /// Length of the random message used when none is supplied.
    pub fn message_bytes(&self) -> usize {
        self.params.message_bytes()
    }

    /// Codeword length `n` in bits for the random-message path.
    pub fn codeword_bits(&self) -> usize {
        8 * (self.message_bytes() + self.codec.ecc_bytes())
    }

    /// Commits to a message under `witness`.
    ///
    /// Without a message (or with an empty one) a uniformly random message of
    /// [`message_bytes`](Self::message_bytes) bytes is drawn from `rng`.
    ///
    /// # Arguments
    ///
    /// * `rng` - A cryptographically secure random number generator
    /// * `witness` - The witness the commitment is bound to
    /// * `message` - Optional message to commit to
    ///
    /// # Returns
    ///
    /// Returns the commitment, or:
    /// - `FcsError::UnsupportedWitnessType` if the extractor rejects the witness
    /// - `FcsError::WitnessTooLong` if the witness exceeds `witness_bits`
    /// - `FcsError::MessageTooShort` / `FcsError::MessageTooLong` for a
    ///   caller-supplied message whose codeword cannot cover the witness or
    ///   does not fit the code
    pub fn commit<K, R>(
        &self,
        rng: &mut R,
        witness: &K,
        message: Option<&[u8]>,
    ) -> Result<Commitment, FcsError>
    where
        K: ?Sized,
        X: Extractor<K>,
        R: Rng + CryptoRng + ?Sized,
    {
        let witness = Zeroizing::new(self.extractor.extract(witness)?);
        match message {
            Some(message) if !message.is_empty() => self.commit_raw(message, &witness),
            _ => self.commit_random_message(rng, &witness),
        }
    }

    /// Commits to a caller-supplied message; no randomness is involved.
    pub fn commit_message<K>(&self, witness: &K, message: &[u8]) -> Result<Commitment, FcsError>
    where
        K: ?Sized,
        X: Extractor<K>,
    {
        let witness = Zeroizing::new(self.extractor.extract(witness)?);
        self.commit_raw(message, &witness)
    }

    /// Tries to open `commitment` with `candidate`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(message))` if the candidate is within tolerance of the
    ///   committed witness
    /// - `Ok(None)` if it is not, or if the commitment was tampered with
    /// - `Err(_)` if the candidate cannot be extracted or is longer than
    ///   `witness_bits`
    pub fn open<K>(&self, commitment: &Commitment, candidate: &K) -> Result<Option<Vec<u8>>, FcsError>
    where
        K: ?Sized,
        X: Extractor<K>,
    {
        let candidate = Zeroizing::new(self.extractor.extract(candidate)?);
        self.open_raw(commitment, &candidate)
    }

    /// Returns whether `candidate` opens `commitment`.
    pub fn verify<K>(&self, commitment: &Commitment, candidate: &K) -> Result<bool, FcsError>
    where
        K: ?Sized,
        X: Extractor<K>,
    {
        Ok(self.open(commitment, candidate)?.is_some())
    }

    fn check_witness_len(&self, witness: &BitString) -> Result<(), FcsError> {
        if witness.len() > self.params.witness_bits {
            return Err(FcsError::WitnessTooLong {
                got: witness.len(),
                max: self.params.witness_bits,
            });
        }
        Ok(())
    }

    fn commit_random_message<R>(&self, rng: &mut R, witness: &BitString) -> Result<Commitment, FcsError>
    where
        R: Rng + CryptoRng + ?Sized,
    {
        // a whole-byte message keeps the codeword at least as long as the witness
        let mut message = Zeroizing::new(vec![0u8; self.message_bytes()]);
        rng.fill(message.as_mut_slice());
        self.commit_raw(&message, witness)
    }

    fn commit_raw(&self, message: &[u8], witness: &BitString) -> Result<Commitment, FcsError> {
        self.check_witness_len(witness)?;

        let max = self.codec.max_data_bytes();
        if message.len() > max {
            return Err(FcsError::MessageTooLong {
                got: message.len(),
                max,
            });
        }
        let codeword_bits = 8 * (message.len() + self.codec.ecc_bytes());
        if codeword_bits < self.params.witness_bits {
            return Err(FcsError::MessageTooShort {
                codeword_bits,
                witness_bits: self.params.witness_bits,
            });
        }

        let ecc = self.codec.encode(message)?;
        let mut codeword_bytes = Zeroizing::new(Vec::with_capacity(message.len() + ecc.len()));
        codeword_bytes.extend_from_slice(message);
        codeword_bytes.extend_from_slice(&ecc);
        let codeword = Zeroizing::new(BitString::from_bytes(&codeword_bytes));

        // An unmasked witness bit would leak; this holds by the checks above.
        assert!(
            codeword.len() >= witness.len(),
            "codeword ({} bits) shorter than witness ({} bits)",
            codeword.len(),
            witness.len()
        );

        let auxiliar = codeword.xor_padded_right(witness);
        trace!(
            message_bytes = message.len(),
            codeword_bits = auxiliar.len(),
            "committed"
        );
        Ok(Commitment::from_parts(pseudonym(message), auxiliar))
    }

    fn open_raw(&self, commitment: &Commitment, candidate: &BitString) -> Result<Option<Vec<u8>>, FcsError> {
        self.check_witness_len(candidate)?;

        let auxiliar = commitment.auxiliar();
        let ecc_bytes = self.codec.ecc_bytes();
        let total_bytes = auxiliar.as_bytes().len();
        let well_formed = auxiliar.len() % 8 == 0
            && total_bytes > ecc_bytes
            && total_bytes - ecc_bytes <= self.codec.max_data_bytes()
            && candidate.len() <= auxiliar.len();
        if !well_formed {
            trace!(codeword_bits = auxiliar.len(), "commitment does not match the code");
            return Ok(None);
        }

        let codeword = Zeroizing::new(auxiliar.xor_padded_right(candidate).into_bytes());
        let (data, ecc) = codeword.split_at(total_bytes - ecc_bytes);
        let decoded = self.codec.decode(data, ecc)?;
        let message = Zeroizing::new(decoded.data);

        // Both checks always run and are combined without short-circuiting.
        let digest_match = commitment.pseudonym()[..].ct_eq(&pseudonym(&message)[..]);
        let corrected = Choice::from(u8::from(decoded.correction.is_corrected()));
        let valid = digest_match & corrected;

        trace!(codeword_bits = auxiliar.len(), "opened");
        if bool::from(valid) {
            Ok(Some(message.to_vec()))
        } else {
            Ok(None)
        }
    }
}

fn pseudonym(message: &[u8]) -> [u8; PSEUDONYM_SIZE] {
    Sha256::digest(message).into()
}
