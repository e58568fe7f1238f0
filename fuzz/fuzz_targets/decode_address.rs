extern crate segwit_addr;

fn do_test(data: &[u8]) {
    let s = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return,
    };
    match segwit_addr::decode(s) {
        Err(_) => {},
        Ok((hrp, version, program)) => {
            let reser = segwit_addr::encode(&hrp, version, &program).unwrap();
            assert_eq!(s.to_ascii_lowercase(), reser);
        },
    }
}

#[cfg(feature = "afl")]
extern crate afl;
#[cfg(feature = "afl")]
fn main() {
    afl::read_stdio_bytes(|data| {
        do_test(&data);
    });
}

#[cfg(feature = "honggfuzz")]
#[macro_use] extern crate honggfuzz;
#[cfg(feature = "honggfuzz")]
fn main() {
    loop {
        fuzz!(|data| {
            do_test(data);
        });
    }
}
