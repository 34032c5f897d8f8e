//! Architecture tags.
//!
//! A tag is a zero-sized marker standing in for a vector instruction set. It
//! carries three compile-time constants (register width, alignment, display
//! name) and nothing else; every other type in the crate is parameterized by
//! one.
//!
//! # Width classes
//!
//! | Tag | Width | Alignment | Class |
//! |-----|-------|-----------|-------|
//! | [`Generic16`] | 16 B | 16 | itself |
//! | [`Generic32`] | 32 B | 32 | itself |
//! | [`Generic64`] | 64 B | 64 | itself |
//! | [`Sse2`], [`Neon`] | 16 B | 16 | [`Generic16`] |
//! | [`Avx`], [`Avx2`] | 32 B | 32 | [`Generic32`] |
//! | [`Avx512`] | 64 B | 64 | [`Generic64`] |
//! | [`HalfVec`] | 8 B | 8 | itself |
//!
//! # Conversions
//!
//! Tags convert explicitly through `From`, never implicitly:
//!
//! - every named instruction-set tag converts into its generic class
//!   (`Sse2 -> Generic16`, `Avx2 -> Generic32`, ...);
//! - [`Generic16`] converts into [`Generic32`] and [`Avx2`].
//!
//! Only tag values convert. Batches are never reinterpreted across tags.
//!
//! # Default architecture
//!
//! [`DefaultArch`] is picked at build time. The `width-128`, `width-256` and
//! `width-512` cargo features force a generic class (widest wins); without
//! them the enabled target features decide.

use std::fmt;
use std::fmt::Debug;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Compile-time descriptor of a vector register class.
pub trait Arch: Copy + Default + Debug + Send + Sync + 'static {
    /// Required alignment of a register, in bytes.
    const ALIGNMENT: usize;
    /// Register width, in bytes.
    const WIDTH: usize;
    /// Display name.
    const NAME: &'static str;

    /// Zero-sized marker whose alignment equals [`Arch::ALIGNMENT`].
    type Align: Copy + Default + Debug + Send + Sync + 'static;

    /// Generic width class this tag belongs to.
    type Class: Arch;

    /// Runtime view of the tag's constants.
    #[must_use]
    fn info() -> ArchInfo {
        ArchInfo {
            name: Self::NAME,
            width: Self::WIDTH,
            alignment: Self::ALIGNMENT,
            class: <Self::Class as Arch>::NAME,
        }
    }
}

/// Runtime description of an [`Arch`] tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ArchInfo {
    /// Display name of the tag.
    pub name: &'static str,
    /// Register width in bytes.
    pub width: usize,
    /// Register alignment in bytes.
    pub alignment: usize,
    /// Display name of the generic width class.
    pub class: &'static str,
}

impl ArchInfo {
    /// Register width in bits.
    #[must_use]
    pub const fn bits(&self) -> usize {
        self.width * 8
    }

    /// Number of lanes a register holds for elements of `element_size` bytes.
    #[must_use]
    pub const fn lanes(&self, element_size: usize) -> usize {
        self.width / element_size
    }
}

impl fmt::Display for ArchInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}-bit, {}-byte aligned)",
            self.name,
            self.bits(),
            self.alignment
        )
    }
}

macro_rules! align_marker {
    ($($(#[$meta:meta])* $name:ident = $align:literal;)*) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        #[repr(align($align))]
        pub struct $name;
    )*};
}

align_marker! {
    /// Zero-sized 8-byte alignment marker.
    Align8 = 8;
    /// Zero-sized 16-byte alignment marker.
    Align16 = 16;
    /// Zero-sized 32-byte alignment marker.
    Align32 = 32;
    /// Zero-sized 64-byte alignment marker.
    Align64 = 64;
}

macro_rules! arch_tag {
    ($(
        $(#[$meta:meta])*
        $name:ident {
            width: $width:literal,
            align: $align:ty = $alignment:literal,
            name: $display:literal,
            class: $class:ty $(,)?
        }
    )*) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl Arch for $name {
            const ALIGNMENT: usize = $alignment;
            const WIDTH: usize = $width;
            const NAME: &'static str = $display;
            type Align = $align;
            type Class = $class;
        }
    )*};
}

arch_tag! {
    /// Generic 128-bit class.
    Generic16 { width: 16, align: Align16 = 16, name: "compiler_autovec16", class: Generic16 }
    /// Generic 256-bit class.
    Generic32 { width: 32, align: Align32 = 32, name: "compiler_autovec32", class: Generic32 }
    /// Generic 512-bit class.
    Generic64 { width: 64, align: Align64 = 64, name: "compiler_autovec64", class: Generic64 }

    /// SSE2 (128-bit).
    Sse2 { width: 16, align: Align16 = 16, name: "sse2", class: Generic16 }
    /// AVX (256-bit).
    Avx { width: 32, align: Align32 = 32, name: "avx", class: Generic32 }
    /// AVX2 (256-bit).
    Avx2 { width: 32, align: Align32 = 32, name: "avx2", class: Generic32 }
    /// AVX-512 (512-bit).
    Avx512 { width: 64, align: Align64 = 64, name: "avx512", class: Generic64 }
    /// ARM NEON (128-bit).
    Neon { width: 16, align: Align16 = 16, name: "neon", class: Generic16 }

    /// Half-width 64-bit batches, independent of the default architecture.
    HalfVec { width: 8, align: Align8 = 8, name: "half_compiler_autovec", class: HalfVec }
}

macro_rules! arch_conversions {
    ($($from:ty => $to:ty),* $(,)?) => {$(
        impl From<$from> for $to {
            #[inline]
            fn from(_: $from) -> Self {
                Self
            }
        }
    )*};
}

arch_conversions! {
    Sse2 => Generic16,
    Neon => Generic16,
    Avx => Generic32,
    Avx2 => Generic32,
    Avx512 => Generic64,
    Generic16 => Generic32,
    Generic16 => Avx2,
}

#[cfg(feature = "width-512")]
/// Architecture used when none is named.
pub type DefaultArch = Generic64;

#[cfg(all(feature = "width-256", not(feature = "width-512")))]
/// Architecture used when none is named.
pub type DefaultArch = Generic32;

#[cfg(all(
    feature = "width-128",
    not(any(feature = "width-256", feature = "width-512"))
))]
/// Architecture used when none is named.
pub type DefaultArch = Generic16;

#[cfg(all(
    not(any(feature = "width-128", feature = "width-256", feature = "width-512")),
    target_feature = "avx512f"
))]
/// Architecture used when none is named.
pub type DefaultArch = Avx512;

#[cfg(all(
    not(any(feature = "width-128", feature = "width-256", feature = "width-512")),
    not(target_feature = "avx512f"),
    target_feature = "avx2"
))]
/// Architecture used when none is named.
pub type DefaultArch = Avx2;

#[cfg(all(
    not(any(feature = "width-128", feature = "width-256", feature = "width-512")),
    not(any(target_feature = "avx512f", target_feature = "avx2")),
    target_feature = "avx"
))]
/// Architecture used when none is named.
pub type DefaultArch = Avx;

#[cfg(all(
    not(any(feature = "width-128", feature = "width-256", feature = "width-512")),
    target_arch = "aarch64"
))]
/// Architecture used when none is named.
pub type DefaultArch = Neon;

#[cfg(all(
    not(any(feature = "width-128", feature = "width-256", feature = "width-512")),
    not(any(
        target_arch = "aarch64",
        target_feature = "avx512f",
        target_feature = "avx2",
        target_feature = "avx"
    )),
    target_feature = "sse2"
))]
/// Architecture used when none is named.
pub type DefaultArch = Sse2;

#[cfg(all(
    not(any(feature = "width-128", feature = "width-256", feature = "width-512")),
    not(any(
        target_arch = "aarch64",
        target_feature = "avx512f",
        target_feature = "avx2",
        target_feature = "avx",
        target_feature = "sse2"
    ))
))]
/// Architecture used when none is named.
pub type DefaultArch = Generic16;

/// Alias of [`DefaultArch`].
pub type Generic = DefaultArch;

/// Report the build-time architecture selection.
///
/// Meant to be called once when the consuming engine starts.
pub fn log_default_arch() -> ArchInfo {
    let info = DefaultArch::info();
    tracing::debug!(
        name = info.name,
        width = info.width,
        alignment = info.alignment,
        class = info.class,
        "default batch architecture"
    );
    info
}
