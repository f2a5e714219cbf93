//! Fails to resolve a registry with a diamond conflict, and prints the explanation.

use otter_grub::{
    config::Config,
    context::Context,
    provider::OfflineProvider,
    reports::text,
    structures::version::ranges::Ranges,
    types::err::ResolutionError,
};

fn main() {
    let mut provider = OfflineProvider::<&str, Ranges<u32>>::default();

    // app needs both web and orm, though they agree on no version of json.
    provider.add_dependencies("app", 1, [("web", Ranges::full()), ("orm", Ranges::full())]);
    provider.add_dependencies("web", 1, [("json", Ranges::between(1, 2))]);
    provider.add_dependencies("orm", 1, [("json", Ranges::between(2, 3))]);
    provider.add_dependencies("json", 1, []);
    provider.add_dependencies("json", 2, []);

    let config = Config {
        collapse_unavailable: true,
    };

    let mut the_context = Context::from_config(config);

    match the_context.resolve(&provider, "app", 1) {
        Err(ResolutionError::NoSolution(tree)) => {
            println!("{}", text::report(&tree));
        }

        Err(err) => println!("Resolution failed: {err}"),

        Ok(_) => println!("An unexpected solution"),
    }
}
