// Shared test fixtures (integration tests compile as separate crates, so keep common code in a
// submodule to avoid it becoming its own test target).

#![allow(dead_code)]

/// A machine-code listing together with the exact text the decoder should produce for it.
///
/// Every fixture uses the encodings NASM itself picks, so assembling `expected` reproduces
/// `bytes`.
pub struct Listing {
    pub name: &'static str,
    pub bytes: &'static [u8],
    pub expected: &'static str,
}

pub const SINGLE_REGISTER_MOV: Listing = Listing {
    name: "single_register_mov",
    bytes: &[0x89, 0xD9],
    expected: "bits 16\n\nmov cx, bx\n",
};

pub const MANY_REGISTER_MOV: Listing = Listing {
    name: "many_register_mov",
    bytes: &[
        0x89, 0xD9, 0x88, 0xE5, 0x89, 0xDA, 0x89, 0xDE, 0x89, 0xFB, 0x88, 0xC8, 0x88, 0xED, 0x89,
        0xC3, 0x89, 0xF3, 0x89, 0xFC, 0x89, 0xC5,
    ],
    expected: "bits 16\n\n\
mov cx, bx
mov ch, ah
mov dx, bx
mov si, bx
mov bx, di
mov al, cl
mov ch, ch
mov bx, ax
mov bx, si
mov sp, di
mov bp, ax
",
};

pub const IMMEDIATE_TO_REGISTER: Listing = Listing {
    name: "immediate_to_register",
    bytes: &[
        0xB0, 0x05, 0xB1, 0x0C, 0xB5, 0xF4, 0xB9, 0x0C, 0x00, 0xB9, 0xF4, 0xFF, 0xBA, 0x6C, 0x0F,
        0xBA, 0x94, 0xF0,
    ],
    expected: "bits 16\n\n\
mov al, 5
mov cl, 12
mov ch, 244
mov cx, 12
mov cx, 65524
mov dx, 3948
mov dx, 61588
",
};

pub const MORE_MOVS: Listing = Listing {
    name: "more_movs",
    bytes: &[
        0x89, 0xDE, 0x88, 0xC6, 0x8A, 0x00, 0x8B, 0x1B, 0x8B, 0x56, 0x00, 0x8A, 0x60, 0x04, 0x8A,
        0x80, 0x87, 0x13, 0x89, 0x09, 0x88, 0x0A, 0x88, 0x6E, 0x00,
    ],
    expected: "bits 16\n\n\
mov si, bx
mov dh, al
mov al, [bx+si]
mov bx, [bp+di]
mov dx, [bp]
mov ah, [bx+si+4]
mov al, [bx+si+4999]
mov [bx+di], cx
mov [bp+si], cl
mov [bp], ch
",
};

pub const SIGNED_DISPLACEMENTS: Listing = Listing {
    name: "signed_displacements",
    bytes: &[
        0x8B, 0x41, 0xDB, 0x89, 0x8C, 0xD4, 0xFE, 0x8B, 0x57, 0xE0, 0x8B, 0x2E, 0x05, 0x00, 0x8B,
        0x1E, 0x82, 0x0D,
    ],
    expected: "bits 16\n\n\
mov ax, [bx+di-37]
mov [si-300], cx
mov dx, [bx-32]
mov bp, [5]
mov bx, [3458]
",
};

pub const ARITHMETIC: Listing = Listing {
    name: "arithmetic",
    bytes: &[
        0x03, 0x18, 0x01, 0x46, 0x00, 0x01, 0xCB, 0x83, 0xC6, 0x02, 0x81, 0xC1, 0xE8, 0x03, 0x83,
        0xC2, 0xFF, 0x83, 0x82, 0xE8, 0x03, 0x1D, 0x80, 0x2F, 0x22, 0x81, 0xE9, 0xE8, 0x03,
    ],
    expected: "bits 16\n\n\
add bx, [bx+si]
add [bp], ax
add bx, cx
add si, 2
add cx, 1000
add dx, 65535
add word [bp+si+1000], 29
sub byte [bx], 34
sub cx, 1000
",
};

pub const ALL: [&Listing; 6] = [
    &SINGLE_REGISTER_MOV,
    &MANY_REGISTER_MOV,
    &IMMEDIATE_TO_REGISTER,
    &MORE_MOVS,
    &SIGNED_DISPLACEMENTS,
    &ARITHMETIC,
];
