mod common;
mod import;
mod routing;
