// Version database
//------------------------------------------------------------------------------

/// Per-version capacity entry.
///
/// Alignment patterns are drawn with their upper left corner at 4, then at `apos`, then at
/// every `astride` after that, on both axes. Versions without a second or third alignment
/// coordinate carry 100, which never fits inside the grid.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct VersionInfo {
    pub apos: usize,
    pub astride: usize,
    // Total codewords, data & ecc
    pub total_codewords: usize,
    // Bits left over after the last codeword in the encoding region
    pub remainder_bits: usize,
    // 18 bit version pattern, zero below version 7
    pub pattern: u32,
    // (Block count, Ecc per block) indexed by error correction level
    pub levels: [(usize, usize); 4],
}

impl VersionInfo {
    const fn new(
        apos: usize,
        astride: usize,
        total_codewords: usize,
        remainder_bits: usize,
        pattern: u32,
        levels: [(usize, usize); 4],
    ) -> Self {
        Self { apos, astride, total_codewords, remainder_bits, pattern, levels }
    }
}

// Index 0 is a placeholder so that the table can be indexed by version number
pub static VERSION_DB: [VersionInfo; 41] = [
    VersionInfo::new(0, 0, 0, 0, 0, [(0, 0); 4]),
    VersionInfo::new(100, 100, 26, 0, 0x00000, [(1, 7), (1, 10), (1, 13), (1, 17)]), // 1
    VersionInfo::new(16, 100, 44, 7, 0x00000, [(1, 10), (1, 16), (1, 22), (1, 28)]), // 2
    VersionInfo::new(20, 100, 70, 7, 0x00000, [(1, 15), (1, 26), (2, 18), (2, 22)]), // 3
    VersionInfo::new(24, 100, 100, 7, 0x00000, [(1, 20), (2, 18), (2, 26), (4, 16)]), // 4
    VersionInfo::new(28, 100, 134, 7, 0x00000, [(1, 26), (2, 24), (4, 18), (4, 22)]), // 5
    VersionInfo::new(32, 100, 172, 7, 0x00000, [(2, 18), (4, 16), (4, 24), (4, 28)]), // 6
    VersionInfo::new(20, 16, 196, 0, 0x07c94, [(2, 20), (4, 18), (6, 18), (5, 26)]), // 7
    VersionInfo::new(22, 18, 242, 0, 0x085bc, [(2, 24), (4, 22), (6, 22), (6, 26)]), // 8
    VersionInfo::new(24, 20, 292, 0, 0x09a99, [(2, 30), (5, 22), (8, 20), (8, 24)]), // 9
    VersionInfo::new(26, 22, 346, 0, 0x0a4d3, [(4, 18), (5, 26), (8, 24), (8, 28)]), // 10
    VersionInfo::new(28, 24, 404, 0, 0x0bbf6, [(4, 20), (5, 30), (8, 28), (11, 24)]), // 11
    VersionInfo::new(30, 26, 466, 0, 0x0c762, [(4, 24), (8, 22), (10, 26), (11, 28)]), // 12
    VersionInfo::new(32, 28, 532, 0, 0x0d847, [(4, 26), (9, 22), (12, 24), (16, 22)]), // 13
    VersionInfo::new(24, 20, 581, 3, 0x0e60d, [(4, 30), (9, 24), (16, 20), (16, 24)]), // 14
    VersionInfo::new(24, 22, 655, 3, 0x0f928, [(6, 22), (10, 24), (12, 30), (18, 24)]), // 15
    VersionInfo::new(24, 24, 733, 3, 0x10b78, [(6, 24), (10, 28), (17, 24), (16, 30)]), // 16
    VersionInfo::new(28, 24, 815, 3, 0x1145d, [(6, 28), (11, 28), (16, 28), (19, 28)]), // 17
    VersionInfo::new(28, 26, 901, 3, 0x12a17, [(6, 30), (13, 26), (18, 28), (21, 28)]), // 18
    VersionInfo::new(28, 28, 991, 3, 0x13532, [(7, 28), (14, 26), (21, 26), (25, 26)]), // 19
    VersionInfo::new(32, 28, 1085, 3, 0x149a6, [(8, 28), (16, 26), (20, 30), (25, 28)]), // 20
    VersionInfo::new(26, 22, 1156, 4, 0x15683, [(8, 28), (17, 26), (23, 28), (25, 30)]), // 21
    VersionInfo::new(24, 24, 1258, 4, 0x168c9, [(9, 28), (17, 28), (23, 30), (34, 24)]), // 22
    VersionInfo::new(28, 24, 1364, 4, 0x177ec, [(9, 30), (18, 28), (25, 30), (30, 30)]), // 23
    VersionInfo::new(26, 26, 1474, 4, 0x18ec4, [(10, 30), (20, 28), (27, 30), (32, 30)]), // 24
    VersionInfo::new(30, 26, 1588, 4, 0x191e1, [(12, 26), (21, 28), (29, 30), (35, 30)]), // 25
    VersionInfo::new(28, 28, 1706, 4, 0x1afab, [(12, 28), (23, 28), (34, 28), (37, 30)]), // 26
    VersionInfo::new(32, 28, 1828, 4, 0x1b08e, [(12, 30), (25, 28), (34, 30), (40, 30)]), // 27
    VersionInfo::new(24, 24, 1921, 3, 0x1cc1a, [(13, 30), (26, 28), (35, 30), (42, 30)]), // 28
    VersionInfo::new(28, 24, 2051, 3, 0x1d33f, [(14, 30), (28, 28), (38, 30), (45, 30)]), // 29
    VersionInfo::new(24, 26, 2185, 3, 0x1ed75, [(15, 30), (29, 28), (40, 30), (48, 30)]), // 30
    VersionInfo::new(28, 26, 2323, 3, 0x1f250, [(16, 30), (31, 28), (43, 30), (51, 30)]), // 31
    VersionInfo::new(32, 26, 2465, 3, 0x209d5, [(17, 30), (33, 28), (45, 30), (54, 30)]), // 32
    VersionInfo::new(28, 28, 2611, 3, 0x216f0, [(18, 30), (35, 28), (48, 30), (57, 30)]), // 33
    VersionInfo::new(32, 28, 2761, 3, 0x228ba, [(19, 30), (37, 28), (51, 30), (60, 30)]), // 34
    VersionInfo::new(28, 24, 2876, 0, 0x2379f, [(19, 30), (38, 28), (53, 30), (63, 30)]), // 35
    VersionInfo::new(22, 26, 3034, 0, 0x24b0b, [(20, 30), (40, 28), (56, 30), (66, 30)]), // 36
    VersionInfo::new(26, 26, 3196, 0, 0x2542e, [(21, 30), (43, 28), (59, 30), (70, 30)]), // 37
    VersionInfo::new(30, 26, 3362, 0, 0x26a64, [(22, 30), (45, 28), (62, 30), (74, 30)]), // 38
    VersionInfo::new(24, 28, 3532, 0, 0x27541, [(24, 30), (47, 28), (65, 30), (77, 30)]), // 39
    VersionInfo::new(28, 28, 3706, 0, 0x28c69, [(25, 30), (49, 28), (68, 30), (81, 30)]), // 40
];
