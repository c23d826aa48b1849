use crate::huffman_coding::FreqTable;

/// Returns a frequency count of the input data.
pub fn freqs(data: &[u8]) -> FreqTable {
    let mut freqs = [0_u32; 256];
    data.iter()
        .for_each(|&el| freqs[el as usize] = freqs[el as usize].saturating_add(1));
    freqs
}

#[test]
fn freqs_test() {
    let f = freqs("Making a silly test.".as_bytes());
    assert_eq!(f[b'a' as usize], 2);
    assert_eq!(f[b'l' as usize], 2);
    assert_eq!(f[b' ' as usize], 3);
    assert_eq!(f[b'z' as usize], 0);
    assert_eq!(f.iter().sum::<u32>(), 20);
}
