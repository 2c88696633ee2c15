use super::hash::Salt;

pub trait FromRandom {
    fn from_random() -> Self;
}

impl FromRandom for Salt {
    fn from_random() -> Self {
        Salt(random_string(32))
    }
}

fn random_string(size: usize) -> String {
    use rand::Rng;

    let s: String = rand::thread_rng()
        .sample_iter(rand::distributions::Alphanumeric)
        .take(size)
        .map(|b| b as char)
        .collect();
    base64::encode_config(s, base64::URL_SAFE_NO_PAD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salts_differ() {
        let a = Salt::from_random();
        let b = Salt::from_random();

        assert_ne!(a.0, b.0);
        assert!(a.0.len() >= 32);
    }
}
