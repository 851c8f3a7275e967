#![no_main]

use argos::Converter;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (String, u8)| {
    let (raw, which) = input;

    let converter = match which % 6 {
        0 => Converter::string(),
        1 => Converter::path(),
        2 => Converter::int(),
        3 => Converter::long(),
        4 => Converter::double(),
        _ => Converter::bool(),
    };

    // `probe` must agree with `convert`: probing never panics, and it must
    // report exactly whether `convert` would succeed.
    let probed = converter.probe(&raw);
    assert_eq!(probed, converter.convert(&raw).is_ok());

    match converter.convert(&raw) {
        Ok(value) => {
            let _ = format!("{value:?}");
        }
        Err(e) => {
            assert_eq!(e.raw, raw);
        }
    }

    // A `one_of` converter restricted to a fixed vocabulary must reject
    // every token outside it and accept every token inside it.
    let choices = Converter::one_of(["alpha", "beta", "gamma"]);
    let result = choices.convert(&raw);
    match raw.as_str() {
        "alpha" | "beta" | "gamma" => assert!(result.is_ok()),
        _ => assert!(result.is_err()),
    }
});
