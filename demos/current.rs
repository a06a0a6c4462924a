//! Print the current input source, optionally switching to another one first.
//!
//! ```sh
//! cargo run --example current -- com.apple.keylayout.US
//! ```
//!
//! The icon of the current input source is written to `current-input-source.png`.

use std::error::Error;

use switchkey::headless::{HeadlessRegistry, InputSourceEntry};
use switchkey::{InputSource, InputSources};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let sources = InputSources::new().unwrap_or_else(|err| {
        tracing::warn!(%err, "using an in-memory registry");
        InputSources::with_registry(
            HeadlessRegistry::new(InputSourceEntry::new("com.apple.keylayout.US", "U.S."))
                .with_entry(InputSourceEntry::new("com.apple.keylayout.ABC", "ABC")),
        )
    });

    if let Some(id) = std::env::args().nth(1) {
        match sources.activate_id(&id)? {
            Some(source) => println!("activated {}", describe(&source)),
            None => println!("no input source with id {id:?}"),
        }
    }

    let current = sources.current();
    println!("current: {}", describe(&current));

    if let Some(icon) = current.icon() {
        let path = "current-input-source.png";
        image::save_buffer(
            path,
            icon.rgba(),
            icon.width(),
            icon.height(),
            image::ExtendedColorType::Rgba8,
        )?;
        println!("icon: {path} ({}x{}, template: {})", icon.width(), icon.height(), icon.can_template());
    }

    Ok(())
}

fn describe(source: &InputSource) -> String {
    format!("{} ({})", source.display_name(), source.id())
}
