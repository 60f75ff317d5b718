//! Main entry point for the `chainreg` executable

use chainreg::application::APP;

/// Boot the `chainreg` application
fn main() {
    abscissa_core::boot(&APP);
}
