//! Declarations of a typechecked module as seen by the test runner.
//!
//! The frontend produces a [`Module`] after parsing and type checking;
//! the runner only reads it.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::{ConcreteType, Span};

/// Number of trials a quickcheck runs when its declaration gives none.
pub const DEFAULT_QUICKCHECK_TEST_COUNT: u64 = 1000;

/// Concrete values bound to a function's parametric parameters for one
/// specialization.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct SymbolicBindings {
    bindings: Vec<(String, i64)>,
}

impl SymbolicBindings {
    pub fn new(bindings: impl IntoIterator<Item = (String, i64)>) -> Self {
        SymbolicBindings {
            bindings: bindings.into_iter().collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.bindings
            .iter()
            .find(|(identifier, _)| identifier == key)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Display for SymbolicBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.bindings.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}

/// Reference to a function declared in some module.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct FunctionRef {
    pub identifier: String,
    /// Name of the module that owns the function.
    pub owner: String,
    /// Parametric keys with no default; these must be bound before the
    /// function can be materialized.
    pub parametric_keys: BTreeSet<String>,
    pub span: Span,
}

impl FunctionRef {
    pub fn new(identifier: impl Into<String>, owner: impl Into<String>, span: Span) -> Self {
        FunctionRef {
            identifier: identifier.into(),
            owner: owner.into(),
            parametric_keys: BTreeSet::new(),
            span,
        }
    }

    #[must_use]
    pub fn with_parametric_keys<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.parametric_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn free_parametric_keys(&self) -> &BTreeSet<String> {
        &self.parametric_keys
    }
}

/// A property-based test declaration.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QuickCheck {
    pub identifier: String,
    pub function: FunctionRef,
    pub test_count: u64,
    pub span: Span,
}

impl QuickCheck {
    /// Quickcheck over `function`, named and located after it.
    pub fn new(function: FunctionRef, test_count: Option<u64>) -> Self {
        QuickCheck {
            identifier: function.identifier.clone(),
            span: function.span,
            test_count: test_count.unwrap_or(DEFAULT_QUICKCHECK_TEST_COUNT),
            function,
        }
    }
}

/// Parameter and return types of a function.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct FunctionType {
    pub params: Vec<ConcreteType>,
    pub ret: ConcreteType,
}

impl FunctionType {
    pub fn new(params: Vec<ConcreteType>, ret: ConcreteType) -> Self {
        FunctionType { params, ret }
    }
}

/// A parsed and typechecked module.
#[derive(Clone, Debug)]
pub struct Module {
    name: String,
    path: PathBuf,
    source: String,
    test_names: Vec<String>,
    quickchecks: Vec<QuickCheck>,
    function_types: FxHashMap<String, FunctionType>,
}

impl Module {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        Module {
            name: name.into(),
            path: path.into(),
            source: source.into(),
            test_names: Vec::new(),
            quickchecks: Vec::new(),
            function_types: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn with_test(mut self, name: impl Into<String>) -> Self {
        self.test_names.push(name.into());
        self
    }

    #[must_use]
    pub fn with_quickcheck(mut self, quickcheck: QuickCheck) -> Self {
        self.quickchecks.push(quickcheck);
        self
    }

    #[must_use]
    pub fn with_function_type(mut self, identifier: impl Into<String>, ty: FunctionType) -> Self {
        self.function_types.insert(identifier.into(), ty);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Unit test names in declaration order.
    pub fn test_names(&self) -> &[String] {
        &self.test_names
    }

    /// Quickcheck declarations in declaration order.
    pub fn quickchecks(&self) -> &[QuickCheck] {
        &self.quickchecks
    }

    pub fn function_type(&self, identifier: &str) -> Option<&FunctionType> {
        self.function_types.get(identifier)
    }
}
