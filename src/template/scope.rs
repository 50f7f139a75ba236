use crate::constants::SYNTHETIC_BINDING_PREFIX;
use crate::template::value::{resolve, split_head};
use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static SYNTHETIC_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{}\d+", regex::escape(SYNTHETIC_BINDING_PREFIX)))
        .expect("synthetic name pattern is valid")
});

/// The expanded context of one render call: the caller's data plus the
/// synthetic bindings created while expanding loops.
///
/// A scope is created per call and dropped with it, so binding names never
/// leak between concurrent renders. The caller's data is only borrowed.
#[derive(Debug)]
pub struct RenderScope<'a> {
    data: &'a Value,
    bindings: IndexMap<String, Value>,
    reserved: IndexSet<String>,
    next_id: usize,
}

impl<'a> RenderScope<'a> {
    pub fn new(data: &'a Value) -> Self {
        Self {
            data,
            bindings: IndexMap::new(),
            reserved: IndexSet::new(),
            next_id: 0,
        }
    }

    /// Withholds every synthetic-looking name written in `text` from
    /// [`RenderScope::bind`], so template text can only reach a binding
    /// through a reference produced by loop expansion.
    pub fn reserve_names_in(&mut self, text: &str) {
        self.reserved
            .extend(SYNTHETIC_NAME.find_iter(text).map(|m| m.as_str().to_string()));
    }

    /// Binds `value` under a fresh name and returns that name.
    ///
    /// Names are unique within the scope and never shadow a top-level key of
    /// the caller's data or a reserved name.
    pub fn bind(&mut self, value: Value) -> String {
        let name = loop {
            let candidate = format!("{SYNTHETIC_BINDING_PREFIX}{}", self.next_id);
            self.next_id += 1;
            let taken = self.bindings.contains_key(&candidate)
                || self.reserved.contains(&candidate)
                || resolve(self.data, &candidate).is_some();
            if !taken {
                break candidate;
            }
        };
        self.bindings.insert(name.clone(), value);
        name
    }

    /// Resolves a dotted path, synthetic bindings first. An empty path is
    /// absent.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return None;
        }
        let (head, rest) = split_head(path);
        match self.bindings.get(head) {
            Some(bound) => resolve(bound, rest),
            None => resolve(self.data, path),
        }
    }

    pub fn bindings(&self) -> &IndexMap<String, Value> {
        &self.bindings
    }
}
