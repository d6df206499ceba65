//! Name mangling for IR functions.
//!
//! Every function (and every parametric specialization of one) that is
//! converted to IR gets a canonical name. The test runner uses the same
//! scheme to find the IR counterpart of an interpreted function.
//!
//! # Mangling Scheme
//!
//! ```text
//! __<module>__<function>[__<binding>_<binding>...]
//! ```
//!
//! Where:
//! - `<module>` is the owning module's name with `.` replaced by `_`
//! - `<function>` is the function identifier
//! - the binding suffix lists every bound parametric value (derived ones
//!   included) in key order, and is present only for parametric functions
//!
//! # Examples
//!
//! | Function | Bindings | Mangled Name |
//! |----------|----------|--------------|
//! | `add` in `math` | none | `__math__add` |
//! | `pad<N>` in `util.bits` | `N: 8` | `__util_bits__pad__8` |
//! | `f<M, N>` in `m` | `M: 2, N: 3` | `__m__f__2_3` |
//! | `g<N, M = N + 1>` in `m` | `N: 8, M: 9` | `__m__g__9_8` |

use std::collections::BTreeSet;
use std::fmt;

use crate::{FunctionRef, SymbolicBindings};

/// Prefix shared by every mangled name.
pub const MANGLE_PREFIX: &str = "__";

/// Separator between name components.
const COMPONENT_SEP: &str = "__";

/// Separator between parametric values.
const BINDING_SEP: &str = "_";

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum MangleError {
    /// A parametric key has no value in the binding environment.
    MissingBindings {
        identifier: String,
        missing: Vec<String>,
    },
    /// An identifier contains characters that cannot appear in an IR name.
    InvalidIdentifier(String),
}

impl fmt::Display for MangleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MangleError::MissingBindings {
                identifier,
                missing,
            } => write!(
                f,
                "not enough symbolic bindings to mangle `{identifier}`; missing: {}",
                missing.join(", ")
            ),
            MangleError::InvalidIdentifier(name) => {
                write!(f, "`{name}` cannot be used in a mangled name")
            }
        }
    }
}

impl std::error::Error for MangleError {}

/// Mangle a function name.
///
/// # Arguments
///
/// * `identifier` - The function identifier
/// * `free_keys` - Parametric keys without a default; each must be bound
/// * `owner` - Name of the owning module
/// * `bindings` - Values for the parametric keys, if this is a specialization
pub fn mangle_name(
    identifier: &str,
    free_keys: &BTreeSet<String>,
    owner: &str,
    bindings: Option<&SymbolicBindings>,
) -> Result<String, MangleError> {
    let module = owner.replace('.', "_");
    check_identifier(&module)?;
    check_identifier(identifier)?;

    let mut result = String::with_capacity(64);
    result.push_str(MANGLE_PREFIX);
    result.push_str(&module);
    result.push_str(COMPONENT_SEP);
    result.push_str(identifier);

    if free_keys.is_empty() {
        return Ok(result);
    }

    let missing: Vec<String> = free_keys
        .iter()
        .filter(|key| bindings.and_then(|b| b.get(key)).is_none())
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(MangleError::MissingBindings {
            identifier: identifier.to_string(),
            missing,
        });
    }

    // Every binding goes into the suffix, derived parametrics included.
    let mut values: Vec<(&str, i64)> = bindings.map(|b| b.iter().collect()).unwrap_or_default();
    values.sort_unstable_by(|a, b| a.0.cmp(b.0));
    let suffix: Vec<String> = values.iter().map(|(_, value)| value.to_string()).collect();

    result.push_str(COMPONENT_SEP);
    result.push_str(&suffix.join(BINDING_SEP));
    Ok(result)
}

/// Mangle a function reference under an optional binding environment.
pub fn mangle_function(
    function: &FunctionRef,
    bindings: Option<&SymbolicBindings>,
) -> Result<String, MangleError> {
    mangle_name(
        &function.identifier,
        function.free_parametric_keys(),
        &function.owner,
        bindings,
    )
}

fn check_identifier(name: &str) -> Result<(), MangleError> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(MangleError::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}
