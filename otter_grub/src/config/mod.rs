/*!
Configuration of a context.

A context takes ownership of a configuration on creation, and consults the configuration at the relevant points of a resolution.
*/

/// The primary configuration structure.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Config {
    /// Fold external 'no versions' incompatibilities into their sibling cause when building a derivation tree.
    ///
    /// A folded tree trades fidelity for brevity: the absence of versions in some part of a set is noted as part of the sibling cause, rather than derived on a line of its own.
    pub collapse_unavailable: bool,
}

impl Default for Config {
    /// The default configuration reports derivations in full.
    fn default() -> Self {
        Config {
            collapse_unavailable: false,
        }
    }
}
