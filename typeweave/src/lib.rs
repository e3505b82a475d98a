#![deny(missing_docs)]
//! # typeweave — umbrella crate
//!
//! A single import surface for typeweave. Re-exports the descriptor model,
//! the resolver chain, and the stock resolvers behind feature flags, plus a
//! `prelude` for the common path.

#[cfg(feature = "core")]
pub use typeweave_chain;
#[cfg(feature = "core")]
pub use typeweave_core;
#[cfg(feature = "manifest")]
pub use typeweave_manifest;
#[cfg(feature = "scan")]
pub use typeweave_scan;
#[cfg(feature = "verdict")]
pub use typeweave_verdict;

/// Common imports for describing types and resolving them.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use typeweave_core::{
        ClassType, DisplayTag, EnabledIfTag, Field, HelpLinkTag, Instance, MemberData,
        MemberDataExt, MemberError, MemberRef, Reflect, ReflectExt, TypeData, TypeDataExt,
        TypeError, TypeRef, UnsweepableTag, primitive,
    };

    #[cfg(feature = "core")]
    pub use typeweave_chain::{
        ResolveError, Resolver, ResolverChain, ResolverRegistry, StackedTypeDataProvider,
        TypeDataProvider,
    };

    #[cfg(feature = "manifest")]
    pub use typeweave_manifest::ManifestResolver;

    #[cfg(feature = "verdict")]
    pub use typeweave_verdict::{
        ExtensionDecorator, ExtensionMember, VerdictBehavior, step_type, verdict_decorator,
    };

    #[cfg(feature = "scan")]
    pub use typeweave_scan::{PluginScanner, ScannerConfig};
}
