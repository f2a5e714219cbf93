//! Resolves a small registry and prints the selected versions.

use otter_grub::{provider::OfflineProvider, structures::version::ranges::Ranges};

fn main() {
    let mut provider = OfflineProvider::<&str, Ranges<u32>>::default();

    provider.add_dependencies("app", 1, [("web", Ranges::higher_than(2)), ("json", Ranges::full())]);
    provider.add_dependencies("web", 1, []);
    provider.add_dependencies("web", 2, [("json", Ranges::between(1, 3))]);
    provider.add_dependencies("web", 3, [("json", Ranges::between(2, 4))]);
    provider.add_dependencies("json", 1, []);
    provider.add_dependencies("json", 2, []);
    provider.add_dependencies("json", 3, []);

    match otter_grub::resolve(&provider, "app", 1) {
        Ok(solution) => {
            println!("A solution was found:");
            for (package, version) in &solution {
                println!("  {package} {version}");
            }
        }

        Err(err) => println!("No solution: {err}"),
    }
}
