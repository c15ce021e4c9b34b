//! 揭示洗牌：由已承诺的种子推导随机池 `[1, n]` 上的一次性置换。
//!
//! 种子承诺为 `hex(sha256(seed|salt))`；揭示时以同一原像的 sha256 作为
//! 计数器哈希流的密钥，驱动 Fisher–Yates 洗牌，结果对相同输入完全确定。

use sha2::{Digest, Sha256};

/// 计算种子承诺：hex(sha256(seed|salt))
pub fn seed_commitment(seed: &str, salt: &str) -> String {
    hex::encode(Sha256::digest(preimage(seed, salt)))
}

fn preimage(seed: &str, salt: &str) -> Vec<u8> {
    format!("{}|{}", seed, salt).into_bytes()
}

/// sha256(key || counter) 组成的确定性字节流
struct HashStream {
    key: [u8; 32],
    counter: u64,
    block: [u8; 32],
    pos: usize,
}

impl HashStream {
    fn new(key: [u8; 32]) -> Self {
        HashStream { key, counter: 0, block: [0u8; 32], pos: 32 }
    }

    fn next_u64(&mut self) -> u64 {
        if self.pos + 8 > self.block.len() {
            let mut hasher = Sha256::new();
            hasher.update(self.key);
            hasher.update(self.counter.to_be_bytes());
            self.block = hasher.finalize().into();
            self.counter += 1;
            self.pos = 0;
        }
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.block[self.pos..self.pos + 8]);
        self.pos += 8;
        u64::from_be_bytes(bytes)
    }

    /// [0, bound) 上的均匀取值（拒绝采样消除取模偏差）
    fn below(&mut self, bound: u64) -> u64 {
        let zone = u64::MAX - u64::MAX % bound;
        loop {
            let r = self.next_u64();
            if r < zone {
                return r % bound;
            }
        }
    }
}

/// 返回 `[1, n]` 的置换：第 i 个元素为 token_id `i + 1` 的展示 id
pub fn permutation(seed: &str, salt: &str, n: u64) -> Vec<u64> {
    let key: [u8; 32] = Sha256::digest(preimage(seed, salt)).into();
    let mut stream = HashStream::new(key);
    let mut ids: Vec<u64> = (1..=n).collect();
    for i in (1..ids.len()).rev() {
        let j = stream.below(i as u64 + 1) as usize;
        ids.swap(i, j);
    }
    ids
}
