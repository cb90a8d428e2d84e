//! Datagram links between peers.
//!
//! The real transport (WebRTC data channel, UDP socket, relay) lives
//! outside this workspace; sessions only need something that moves
//! datagrams with no guarantees. The in-process implementations here
//! exist for local play and for tests that want hostile delivery on
//! purpose.

use crossbeam_channel::{Receiver, Sender, unbounded};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// An unreliable, unordered datagram link to the peer.
///
/// `send` is best effort: the link may drop, delay, or reorder. `poll`
/// hands over whatever has arrived since the last call, in whatever
/// order the link felt like delivering it.
pub trait Link {
    fn send(&mut self, datagram: Vec<u8>);
    fn poll(&mut self) -> Vec<Vec<u8>>;
}

/// In-process link endpoint; see [`loopback_pair`].
pub struct LoopbackLink {
    tx: Sender<Vec<u8>>,
    rx: Receiver<Vec<u8>>,
}

/// Two connected in-process endpoints delivering instantly and in order.
pub fn loopback_pair() -> (LoopbackLink, LoopbackLink) {
    let (a_tx, b_rx) = unbounded();
    let (b_tx, a_rx) = unbounded();
    (
        LoopbackLink { tx: a_tx, rx: a_rx },
        LoopbackLink { tx: b_tx, rx: b_rx },
    )
}

impl Link for LoopbackLink {
    fn send(&mut self, datagram: Vec<u8>) {
        // A hung-up peer just means the datagram goes nowhere, which is
        // within the link contract.
        let _ = self.tx.send(datagram);
    }

    fn poll(&mut self) -> Vec<Vec<u8>> {
        self.rx.try_iter().collect()
    }
}

/// Decorator that holds arriving datagrams back for a random number of
/// polls, reordering traffic in the process.
///
/// The randomness is a seeded [`StdRng`], so a given seed always produces
/// the same hostile schedule: tests stay reproducible while still
/// exercising the rollback path hard.
pub struct JitterLink<L> {
    inner: L,
    rng: StdRng,
    max_delay_polls: u64,
    polls: u64,
    pending: Vec<(u64, Vec<u8>)>,
}

impl<L: Link> JitterLink<L> {
    pub fn new(inner: L, seed: u64, max_delay_polls: u64) -> Self {
        Self {
            inner,
            rng: StdRng::seed_from_u64(seed),
            max_delay_polls,
            polls: 0,
            pending: Vec::new(),
        }
    }
}

impl<L: Link> Link for JitterLink<L> {
    fn send(&mut self, datagram: Vec<u8>) {
        self.inner.send(datagram);
    }

    fn poll(&mut self) -> Vec<Vec<u8>> {
        self.polls += 1;
        for datagram in self.inner.poll() {
            let due = self.polls + self.rng.random_range(0..=self.max_delay_polls);
            self.pending.push((due, datagram));
        }

        let mut delivered = Vec::new();
        self.pending.retain(|(due, datagram)| {
            if *due <= self.polls {
                delivered.push(datagram.clone());
                false
            } else {
                true
            }
        });
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_delivers_in_order() {
        let (mut a, mut b) = loopback_pair();
        a.send(vec![1]);
        a.send(vec![2]);

        assert_eq!(b.poll(), vec![vec![1], vec![2]]);
        assert!(b.poll().is_empty());

        b.send(vec![3]);
        assert_eq!(a.poll(), vec![vec![3]]);
    }

    #[test]
    fn jitter_eventually_delivers_everything() {
        let (mut a, b) = loopback_pair();
        let mut b = JitterLink::new(b, 42, 4);

        for n in 0..20u8 {
            a.send(vec![n]);
        }

        let mut got: Vec<u8> = Vec::new();
        for _ in 0..30 {
            for datagram in b.poll() {
                got.push(datagram[0]);
            }
        }

        assert_eq!(got.len(), 20);
        let mut sorted = got.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_schedule() {
        let deliveries = |seed: u64| {
            let (mut a, b) = loopback_pair();
            let mut b = JitterLink::new(b, seed, 6);
            for n in 0..10u8 {
                a.send(vec![n]);
            }
            let mut order = Vec::new();
            for _ in 0..20 {
                order.push(b.poll());
            }
            order
        };

        assert_eq!(deliveries(7), deliveries(7));
    }
}
