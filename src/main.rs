mod catalog;
mod config;
mod error;
mod library;
mod runtime;

#[cfg(test)]
mod testing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
