#[macro_export]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		#[cfg(debug_assertions)]
		{
			eprintln!($($arg)*);
		}
	}};
}

pub mod config;
pub mod language;
pub mod syntax;
pub mod models;
pub mod classifier;
pub mod detector;
pub mod diff;
pub mod filters;
pub mod xml_builder;
pub mod formatter;
pub mod input;
pub mod checker;
pub mod server;
