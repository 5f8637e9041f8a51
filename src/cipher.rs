/// Keystream permutation table derived from a candidate key
pub struct Schedule {
    table: [u8; 256],
}

impl Schedule {
    /// Build the permutation table for a key. The key cursor cycles through
    /// the key, so any non-empty key length works.
    pub fn new(key: &[u8]) -> Schedule {
        let mut table = [0u8; 256];
        for i in 0..256 {
            table[i] = i as u8;
        }

        let mut acc = 0u8;
        let mut j = 0;
        for i in 0..256 {
            acc = table[i].wrapping_add(acc).wrapping_add(key[j]);
            table.swap(i, acc as usize);

            j += 1;
            if j >= key.len() {
                j = 0;
            }
        }

        Schedule { table }
    }

    /// Decrypt a ciphertext of at least two bytes, consuming the schedule.
    ///
    /// The target's generator differs from textbook RC4 in two ways it
    /// inherited from the original binary: position 0 of the table is
    /// skipped, and the keystream byte is looked up at the sum of the two
    /// swapped values instead of a third running index. The output holds
    /// length - 1 bytes; the last one is never written and stays 0, which
    /// is the NUL terminator of the decoded message.
    pub fn decrypt(mut self, ciphertext: &[u8]) -> Vec<u8> {
        let mut plain = vec![0u8; ciphertext.len() - 1];

        let mut j = 0usize;
        for i in 1..ciphertext.len() - 1 {
            let byte1 = self.table[i];
            j = (j + byte1 as usize) & 0xff;
            let byte2 = self.table[j];

            self.table[i] = byte2;
            self.table[j] = byte1;

            plain[i - 1] = self.table[(byte1 as usize + byte2 as usize) & 0xff] ^ ciphertext[i - 1];
        }

        plain
    }
}

#[cfg(test)]
mod tests {
    use super::Schedule;
    use crate::data::CIPHERTEXT;

    const KNOWN_KEY: [u8; 11] = [
        0x62, 0x30, 0x30, 0x21, 0x41, 0x36, 0x4a, 0x78, 0x5e, 0x40, 0x73,
    ];

    fn is_permutation(table: &[u8; 256]) -> bool {
        let mut seen = [false; 256];
        for &b in table.iter() {
            seen[b as usize] = true;
        }
        seen.iter().all(|&s| s)
    }

    #[test]
    fn schedule_is_a_permutation() {
        assert!(is_permutation(&Schedule::new(&KNOWN_KEY).table));
        assert!(is_permutation(&Schedule::new(&[0u8; 11]).table));
        assert!(is_permutation(&Schedule::new(&[0xff; 11]).table));
        assert!(is_permutation(&Schedule::new(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]).table));
    }

    #[test]
    fn schedule_vectors() {
        assert_eq!([98, 122, 197, 154, 130, 189, 34, 116], Schedule::new(&KNOWN_KEY).table[0..8]);
        assert_eq!([0, 35, 3, 43, 9, 11, 65, 229], Schedule::new(&[0u8; 11]).table[0..8]);
        assert_eq!(
            [171, 249, 5, 29, 158, 25, 95, 51],
            Schedule::new(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]).table[0..8]
        );
    }

    #[test]
    fn decrypt_known_key() {
        let plain = Schedule::new(&KNOWN_KEY).decrypt(&CIPHERTEXT);
        assert_eq!(b"Key:wow_th4t_w4s_impr3ssive.Kudos\0".to_vec(), plain);
    }

    #[test]
    fn decrypt_is_deterministic() {
        let key = [0x13u8; 11];
        let first = Schedule::new(&key).decrypt(&CIPHERTEXT);
        let second = Schedule::new(&key).decrypt(&CIPHERTEXT);
        assert_eq!(first, second);
    }

    #[test]
    fn decrypt_output_length() {
        let plain = Schedule::new(&KNOWN_KEY).decrypt(&CIPHERTEXT);
        assert_eq!(CIPHERTEXT.len() - 1, plain.len());
        assert_eq!(0, *plain.last().unwrap());
    }
}
