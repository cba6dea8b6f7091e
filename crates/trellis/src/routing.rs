//! Sum-type routing for combined components.
//!
//! A combined component speaks `Either<private, Either<public1, public2>>`
//! on both sides. Routing between that surface and the two constituent
//! components is a closed four-way union with total mappings in each
//! direction, written once here rather than inline per call site.

use either::Either;

/// Where a value fed into a combined component must go.
#[derive(Clone, Debug, PartialEq)]
pub enum Routed<I1, I2, Q1, Q2> {
    /// Into the first component's private channel.
    PrivateFirst(I1),
    /// Into the second component's private channel.
    PrivateSecond(I2),
    /// Into the first component's public channel.
    PublicFirst(Q1),
    /// Into the second component's public channel.
    PublicSecond(Q2),
}

/// Total input split: combined surface to constituent channel.
pub fn split<I1, I2, Q1, Q2>(
    input: Either<Either<I1, I2>, Either<Q1, Q2>>,
) -> Routed<I1, I2, Q1, Q2> {
    match input {
        Either::Left(Either::Left(private)) => Routed::PrivateFirst(private),
        Either::Left(Either::Right(private)) => Routed::PrivateSecond(private),
        Either::Right(Either::Left(public)) => Routed::PublicFirst(public),
        Either::Right(Either::Right(public)) => Routed::PublicSecond(public),
    }
}

/// Total output merge for the first component: re-tag its private messages
/// left-of-left and its public responses left-of-right.
pub fn merge_first<I1, I2, S1, S2>(output: Either<I1, S1>) -> Either<Either<I1, I2>, Either<S1, S2>> {
    match output {
        Either::Left(private) => Either::Left(Either::Left(private)),
        Either::Right(public) => Either::Right(Either::Left(public)),
    }
}

/// Total output merge for the second component, mirroring [`merge_first`].
pub fn merge_second<I1, I2, S1, S2>(
    output: Either<I2, S2>,
) -> Either<Either<I1, I2>, Either<S1, S2>> {
    match output {
        Either::Left(private) => Either::Left(Either::Right(private)),
        Either::Right(public) => Either::Right(Either::Right(public)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type In = Either<Either<u8, u16>, Either<u32, u64>>;

    #[test]
    fn split_covers_all_four_slots() {
        assert_eq!(
            split::<u8, u16, u32, u64>(Either::Left(Either::Left(1))),
            Routed::PrivateFirst(1)
        );
        assert_eq!(
            split::<u8, u16, u32, u64>(Either::Left(Either::Right(2))),
            Routed::PrivateSecond(2)
        );
        assert_eq!(
            split::<u8, u16, u32, u64>(Either::Right(Either::Left(3))),
            Routed::PublicFirst(3)
        );
        assert_eq!(
            split::<u8, u16, u32, u64>(Either::Right(Either::Right(4))),
            Routed::PublicSecond(4)
        );
    }

    #[test]
    fn merge_then_split_round_trips() {
        let first: In = merge_first::<u8, u16, u32, u64>(Either::Left(9));
        assert_eq!(split(first), Routed::PrivateFirst(9));

        let second: In = merge_second::<u8, u16, u32, u64>(Either::Right(8));
        assert_eq!(split(second), Routed::PublicSecond(8));
    }
}
