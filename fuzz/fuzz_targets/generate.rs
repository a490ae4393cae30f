#![no_main]

use blockgen::{CodeGenerator, GenConfig, load_program, standard_handlers};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // If the document loads, generation must either succeed or report an error without panicking
        if let Ok(program) = load_program(s) {
            let generator = CodeGenerator::new(standard_handlers(), GenConfig::default());
            let _ = generator.generate_program(&program);
        }
    }
});
