use marie_arch::{Inst, Opcode, MEMORY_SIZE};
use masm::{assemble, ErrorKind, Program, Word};

const CODE: &str = "\
/ add two numbers
START, LOAD X
       ADD Y
       STORE Z
       SKIPCOND EQ
       HALT
X,     DEC 2
Y,     HEX 3
Z,     DEC 0
";

fn program() -> Program {
    assemble(CODE).unwrap()
}

#[test]
fn hex_dump() {
    assert_eq!(
        program().hex(),
        "000 1005\n001 3006\n002 2007\n003 8400\n004 7000\n005 0002\n006 0003\n007 0000\n"
    );
}

#[test]
fn plain_listing() {
    let listing = program().listing(false);
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "000: 1005  LOAD     005");
    assert_eq!(lines[3], "003: 8400  SKIPCOND 400");
    assert_eq!(lines[4], "004: 7000  HALT");
    assert_eq!(lines[5], "005: 0002  HEX      0002");
}

#[test]
fn color_listing_keeps_text() {
    let listing = program().listing(true);
    assert!(listing.contains("LOAD"));
    assert!(listing.contains("(EQ)"));
}

#[test]
fn words_carry_source_lines() {
    let program = program();
    let lines: Vec<usize> = program.words().iter().map(|w| w.line).collect();
    assert_eq!(lines, vec![2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(program.words()[3].inst, Inst::Op(Opcode::SKIPCOND, 0x400));
    assert_eq!(program.words()[6].inst, Inst::Data(3));
}

#[test]
fn memory_image() {
    let program = assemble("ORG 4095\nHALT\nORG 2\nDEC 258").unwrap();
    let image = program.image();
    assert_eq!(image.len(), MEMORY_SIZE);
    assert_eq!(image[2], 0x0102);
    assert_eq!(image[4095], 0x7000);
    assert_eq!(image.iter().filter(|&&w| w != 0).count(), 2);

    let bytes = program.to_bytes();
    assert_eq!(bytes.len(), MEMORY_SIZE * 2);
    assert_eq!(&bytes[4..6], &[0x01, 0x02]);
    assert_eq!(&bytes[8190..], &[0x70, 0x00]);
}

#[test]
fn symbol_listing() {
    let listing = program().symbol_listing();
    let names: Vec<&str> = listing
        .lines()
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    assert_eq!(names, vec!["START", "X", "Y", "Z"]);
    assert!(listing.lines().nth(1).unwrap().ends_with("005"));
}

#[test]
fn yaml_round_trip() {
    let program = program();
    let yaml = program.to_yaml().unwrap();
    assert!(yaml.contains("address"));
    assert!(yaml.contains("START"));
    let back: Program = serde_yaml::from_str(&yaml).unwrap();
    let pairs = |p: &Program| -> Vec<(u16, u16)> {
        p.words().iter().map(|w| (w.address, w.word)).collect()
    };
    assert_eq!(pairs(&back), pairs(&program));
    assert_eq!(back.symbols(), program.symbols());
}

#[test]
fn overlap_is_rejected() {
    let words = vec![
        Word::new(7, Inst::Op(Opcode::HALT, 0), 1, 1),
        Word::new(3, Inst::Data(1), 2, 1),
        Word::new(7, Inst::Data(2), 5, 3),
    ];
    let err = Program::new(words, vec![]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::AddressOverlap(7, 1));
    assert_eq!((err.line, err.column), (5, 3));
}

#[test]
fn sorted_by_address() {
    let words = vec![
        Word::new(9, Inst::Data(1), 1, 1),
        Word::new(2, Inst::Data(2), 2, 1),
    ];
    let program = Program::new(words, vec![]).unwrap();
    let addrs: Vec<u16> = program.words().iter().map(|w| w.address).collect();
    assert_eq!(addrs, vec![2, 9]);
}

#[test]
fn address_outside_memory() {
    let words = vec![Word::new(4096, Inst::Data(1), 4, 2)];
    let err = Program::new(words, vec![]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::AddressOutOfRange(4096));
    assert_eq!((err.line, err.column), (4, 2));
}

#[test]
fn word_must_encode_inst() {
    let mut word = Word::new(3, Inst::Op(Opcode::LOAD, 5), 1, 1);
    word.word = 0x2005;
    let err = Program::new(vec![word], vec![]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::WordMismatch(3, 0x2005));

    let wide = Word {
        address: 0,
        word: 0x1000,
        inst: Inst::Op(Opcode::LOAD, 0x5000),
        line: 1,
        column: 1,
    };
    assert!(Program::new(vec![wide], vec![]).is_err());

    let halt = Word {
        address: 0,
        word: 0x7000,
        inst: Inst::Op(Opcode::HALT, 9),
        line: 1,
        column: 1,
    };
    assert!(Program::new(vec![halt], vec![]).is_err());
}

#[test]
fn yaml_load_is_checked() {
    let outside = "words:\n- address: 5000\n  word: 1\n  inst: !Data 1\n  line: 1\nsymbols: []\n";
    let err = serde_yaml::from_str::<Program>(outside).unwrap_err();
    assert!(err.to_string().contains("outside"), "{}", err);

    let mismatch = "words:\n- address: 5\n  word: 2\n  inst: !Data 1\n  line: 1\nsymbols: []\n";
    let err = serde_yaml::from_str::<Program>(mismatch).unwrap_err();
    assert!(err.to_string().contains("does not match"), "{}", err);

    let overlap = "words:\n- address: 5\n  word: 1\n  inst: !Data 1\n  line: 1\n\
                   - address: 5\n  word: 2\n  inst: !Data 2\n  line: 2\nsymbols: []\n";
    assert!(serde_yaml::from_str::<Program>(overlap).is_err());

    let fine = "words:\n- address: 5\n  word: 1\n  inst: !Data 1\n  line: 1\nsymbols: []\n";
    let program: Program = serde_yaml::from_str(fine).unwrap();
    assert_eq!(program.image()[5], 1);
}
