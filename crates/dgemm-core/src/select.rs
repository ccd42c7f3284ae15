//! Runtime kernel selection.
//!
//! The host is probed once per process. Callers may state a preference,
//! either directly or through the `DGEMM_KERNEL` environment variable; a
//! preference the host cannot honour degrades to the next narrower variant,
//! ending at the scalar kernel, which is always available.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::cpu::ScalarKernel;
use crate::error::{MatrixError, Result};
use crate::kernel::{KernelVariant, MultiplyKernel};

/// Environment variable holding the default kernel preference.
pub const KERNEL_ENV: &str = "DGEMM_KERNEL";

static SCALAR: ScalarKernel = ScalarKernel;

/// Vector features of the host that matter to the kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub arch: &'static str,
    pub avx2: bool,
    pub sse2: bool,
    pub neon: bool,
}

impl Capabilities {
    /// Whether `variant` can run on this host.
    pub fn supports(&self, variant: KernelVariant) -> bool {
        match variant {
            KernelVariant::Wide => self.avx2,
            KernelVariant::Narrow => self.sse2 || self.neon,
            KernelVariant::Scalar => true,
        }
    }

    /// The widest supported variant.
    pub fn best(&self) -> KernelVariant {
        self.best_from(KernelVariant::Wide)
    }

    /// The widest supported variant no wider than `start`.
    fn best_from(&self, start: KernelVariant) -> KernelVariant {
        KernelVariant::ALL
            .iter()
            .copied()
            .skip_while(|v| *v != start)
            .find(|v| self.supports(*v))
            .unwrap_or(KernelVariant::Scalar)
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (avx2={}, sse2={}, neon={})",
            self.arch, self.avx2, self.sse2, self.neon
        )
    }
}

#[cfg(target_arch = "x86_64")]
fn detect() -> Capabilities {
    Capabilities {
        arch: "x86_64",
        avx2: std::arch::is_x86_feature_detected!("avx2"),
        sse2: std::arch::is_x86_feature_detected!("sse2"),
        neon: false,
    }
}

#[cfg(target_arch = "aarch64")]
fn detect() -> Capabilities {
    Capabilities {
        arch: "aarch64",
        avx2: false,
        sse2: false,
        neon: std::arch::is_aarch64_feature_detected!("neon"),
    }
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn detect() -> Capabilities {
    Capabilities {
        arch: "generic",
        avx2: false,
        sse2: false,
        neon: false,
    }
}

static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();

/// Host capabilities, probed on first use.
pub fn capabilities() -> &'static Capabilities {
    CAPABILITIES.get_or_init(|| {
        let caps = detect();
        debug!(%caps, "probed host capabilities");
        caps
    })
}

/// Which kernel a caller asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelPreference {
    /// Widest variant the host supports.
    #[default]
    Auto,
    Wide,
    Narrow,
    Scalar,
}

impl KernelPreference {
    pub const fn label(self) -> &'static str {
        match self {
            KernelPreference::Auto => "auto",
            KernelPreference::Wide => "wide",
            KernelPreference::Narrow => "narrow",
            KernelPreference::Scalar => "scalar",
        }
    }

    /// Read the preference from `DGEMM_KERNEL`.
    ///
    /// Unset means `Auto`; an unrecognized value is logged and treated as
    /// `Auto`.
    pub fn from_env() -> Self {
        match std::env::var(KERNEL_ENV) {
            Ok(value) => value.parse().unwrap_or_else(|e| {
                warn!(error = %e, "ignoring {}", KERNEL_ENV);
                KernelPreference::Auto
            }),
            Err(_) => KernelPreference::Auto,
        }
    }
}

impl fmt::Display for KernelPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for KernelPreference {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(KernelPreference::Auto),
            "wide" | "avx2" => Ok(KernelPreference::Wide),
            "narrow" | "sse2" | "neon" => Ok(KernelPreference::Narrow),
            "scalar" | "generic" => Ok(KernelPreference::Scalar),
            other => Err(MatrixError::UnknownKernel(other.to_string())),
        }
    }
}

impl From<KernelVariant> for KernelPreference {
    fn from(variant: KernelVariant) -> Self {
        match variant {
            KernelVariant::Wide => KernelPreference::Wide,
            KernelVariant::Narrow => KernelPreference::Narrow,
            KernelVariant::Scalar => KernelPreference::Scalar,
        }
    }
}

/// Resolve a preference against a set of capabilities.
pub fn resolve(preference: KernelPreference, caps: &Capabilities) -> KernelVariant {
    let wanted = match preference {
        KernelPreference::Auto => return caps.best(),
        KernelPreference::Wide => KernelVariant::Wide,
        KernelPreference::Narrow => KernelVariant::Narrow,
        KernelPreference::Scalar => KernelVariant::Scalar,
    };
    let chosen = caps.best_from(wanted);
    if chosen != wanted {
        warn!(
            requested = %wanted,
            using = %chosen,
            arch = caps.arch,
            "requested kernel unsupported on this host"
        );
    }
    chosen
}

static SELECTED: OnceLock<KernelVariant> = OnceLock::new();

/// The variant used by [`default_kernel`]: the `DGEMM_KERNEL` preference
/// resolved against this host. Computed once per process.
pub fn select_kernel() -> KernelVariant {
    *SELECTED.get_or_init(|| {
        let preference = KernelPreference::from_env();
        let variant = resolve(preference, capabilities());
        debug!(%preference, %variant, "selected default kernel");
        variant
    })
}

/// Like [`select_kernel`] but for an explicit preference; not cached.
pub fn select_kernel_with(preference: KernelPreference) -> KernelVariant {
    resolve(preference, capabilities())
}

/// The kernel implementing `variant`, or `None` if this host cannot run it.
pub fn kernel_for(variant: KernelVariant) -> Option<&'static dyn MultiplyKernel> {
    if !capabilities().supports(variant) {
        return None;
    }
    Some(instance(variant))
}

/// The kernel for the process-wide selection.
pub fn default_kernel() -> &'static dyn MultiplyKernel {
    instance(select_kernel())
}

/// Every kernel this host can run, widest first.
pub fn available_kernels() -> Vec<&'static dyn MultiplyKernel> {
    KernelVariant::ALL
        .iter()
        .filter_map(|v| kernel_for(*v))
        .collect()
}

fn instance(variant: KernelVariant) -> &'static dyn MultiplyKernel {
    match variant {
        #[cfg(target_arch = "x86_64")]
        KernelVariant::Wide if capabilities().avx2 => &crate::cpu::x86::AVX2,
        #[cfg(target_arch = "x86_64")]
        KernelVariant::Narrow if capabilities().sse2 => &crate::cpu::x86::SSE2,
        #[cfg(target_arch = "aarch64")]
        KernelVariant::Narrow if capabilities().neon => &crate::cpu::neon::NEON,
        _ => &SCALAR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(avx2: bool, sse2: bool, neon: bool) -> Capabilities {
        Capabilities {
            arch: "test",
            avx2,
            sse2,
            neon,
        }
    }

    #[test]
    fn test_best_prefers_widest() {
        assert_eq!(caps(true, true, false).best(), KernelVariant::Wide);
        assert_eq!(caps(false, true, false).best(), KernelVariant::Narrow);
        assert_eq!(caps(false, false, true).best(), KernelVariant::Narrow);
        assert_eq!(caps(false, false, false).best(), KernelVariant::Scalar);
    }

    #[test]
    fn test_resolve_explicit() {
        let full = caps(true, true, false);
        assert_eq!(resolve(KernelPreference::Narrow, &full), KernelVariant::Narrow);
        assert_eq!(resolve(KernelPreference::Scalar, &full), KernelVariant::Scalar);
        assert_eq!(resolve(KernelPreference::Auto, &full), KernelVariant::Wide);
    }

    #[test]
    fn test_resolve_degrades() {
        let neon_only = caps(false, false, true);
        assert_eq!(resolve(KernelPreference::Wide, &neon_only), KernelVariant::Narrow);

        let bare = caps(false, false, false);
        assert_eq!(resolve(KernelPreference::Wide, &bare), KernelVariant::Scalar);
        assert_eq!(resolve(KernelPreference::Narrow, &bare), KernelVariant::Scalar);
    }

    #[test]
    fn test_parse_preference() {
        assert_eq!("auto".parse::<KernelPreference>(), Ok(KernelPreference::Auto));
        assert_eq!(" AVX2 ".parse::<KernelPreference>(), Ok(KernelPreference::Wide));
        assert_eq!("neon".parse::<KernelPreference>(), Ok(KernelPreference::Narrow));
        assert_eq!("scalar".parse::<KernelPreference>(), Ok(KernelPreference::Scalar));
        assert_eq!(
            "avx512".parse::<KernelPreference>(),
            Err(MatrixError::UnknownKernel("avx512".to_string()))
        );
    }

    #[test]
    fn test_scalar_always_available() {
        let k = kernel_for(KernelVariant::Scalar).unwrap();
        assert_eq!(k.variant(), KernelVariant::Scalar);
        assert!(available_kernels()
            .iter()
            .any(|k| k.variant() == KernelVariant::Scalar));
    }

    #[test]
    fn test_kernel_for_matches_capabilities() {
        for variant in KernelVariant::ALL {
            match kernel_for(variant) {
                Some(k) => assert_eq!(k.variant(), variant),
                None => assert!(!capabilities().supports(variant)),
            }
        }
    }

    #[test]
    fn test_selection_is_deterministic() {
        assert_eq!(select_kernel(), select_kernel());
        assert!(capabilities().supports(select_kernel()));
        assert_eq!(default_kernel().variant(), select_kernel());
    }
}
