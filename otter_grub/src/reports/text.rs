/*!
The default text reporter: a derivation tree written as a numbered list of inferences.

The tree is walked post-order, so every cause is written before the conclusion it supports.
Each derived node concludes a line of the form:

```none
3. because no versions of c satisfy >=2 and b ==1 depends on c >=2, b ==1 is forbidden
```

A node whose `shared_id` is set is explained once, at its first visit, and every later visit cites the line instead:

```none
7. because a ==1 is forbidden (line 3) and the root requirement is root 1, version solving failed
```

# Example

```rust
# use otter_grub::provider::OfflineProvider;
# use otter_grub::reports::text;
# use otter_grub::structures::version::ranges::Ranges;
# use otter_grub::types::err::ResolutionError;
let mut provider = OfflineProvider::<&str, Ranges<u32>>::default();
provider.add_dependencies("root", 1, [("a", Ranges::higher_than(2))]);
provider.add_dependencies("a", 1, []);

match otter_grub::resolve(&provider, "root", 1) {
    Err(ResolutionError::NoSolution(tree)) => {
        let report = text::report(&tree);
        assert!(report.contains("no versions of a satisfy >=2"));
    }
    _ => panic!("A solution without versions"),
}
```
*/

use std::collections::HashMap;
use std::fmt::Display;

use crate::{
    reports::{Derived, DerivationTree, External},
    structures::{package::Package, term::Term, version::VersionSet},
};

/// The derivation tree, written as a numbered list of inferences.
pub fn report<P: Package, VS: VersionSet + Display, M: Display>(
    tree: &DerivationTree<P, VS, M>,
) -> String {
    match tree {
        DerivationTree::External(external) => external.to_string(),

        DerivationTree::Derived(derived) => {
            let mut reporter = TextReporter::default();
            reporter.conclude(derived);
            reporter.lines.join("\n")
        }
    }
}

/// The working state of a report: the lines written, and the line on which each shared node was explained.
struct TextReporter {
    lines: Vec<String>,
    shared_lines: HashMap<usize, usize>,
}

impl Default for TextReporter {
    fn default() -> Self {
        TextReporter {
            lines: Vec::default(),
            shared_lines: HashMap::default(),
        }
    }
}

impl TextReporter {
    /// Writes the causes of `derived`, then the conclusion, and returns the (one-based) line of the conclusion.
    fn conclude<P: Package, VS: VersionSet + Display, M: Display>(
        &mut self,
        derived: &Derived<P, VS, M>,
    ) -> usize {
        let cause1 = self.cite(&derived.cause1);
        let cause2 = self.cite(&derived.cause2);

        let line = self.lines.len() + 1;
        self.lines.push(format!(
            "{line}. because {cause1} and {cause2}, {}",
            conclusion(derived)
        ));

        if let Some(id) = derived.shared_id {
            self.shared_lines.insert(id, line);
        }

        line
    }

    /// The phrase citing `tree` as a cause: an axiom verbatim, or a conclusion with the line which established it.
    fn cite<P: Package, VS: VersionSet + Display, M: Display>(
        &mut self,
        tree: &DerivationTree<P, VS, M>,
    ) -> String {
        match tree {
            DerivationTree::External(external) => external.to_string(),

            DerivationTree::Derived(derived) => {
                let line = match derived.shared_id.and_then(|id| self.shared_lines.get(&id)) {
                    Some(&line) => line,
                    None => self.conclude(derived),
                };
                format!("{} (line {line})", conclusion(derived))
            }
        }
    }
}

/// The statement a derived node makes, read from its terms.
fn conclusion<P: Package, VS: VersionSet + Display, M>(derived: &Derived<P, VS, M>) -> String {
    match derived.terms.as_slice() {
        [] => "version solving failed".to_string(),

        [(package, Term::Positive(set))] => format!("{package} {set} is forbidden"),

        [(package, Term::Negative(set))] => format!("{package} is required at {set}"),

        [(p1, Term::Positive(s1)), (p2, Term::Negative(s2))] => {
            format!("{p1} {s1} requires {p2} {s2}")
        }

        [(p1, Term::Negative(s1)), (p2, Term::Positive(s2))] => {
            format!("{p2} {s2} requires {p1} {s1}")
        }

        terms => {
            let statements: Vec<String> = terms
                .iter()
                .map(|(package, term)| format!("{package} at {term}"))
                .collect();
            format!("{} cannot all hold", statements.join(", "))
        }
    }
}
