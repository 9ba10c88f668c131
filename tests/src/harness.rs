//! # In-Memory Test Network
//!
//! Nodes are real `ReplicationService<Ledger, PeerRegistry>` instances. A
//! connection between two nodes is a pair of real `PeerLink`s; instead of a
//! socket, [`TestNetwork::pump`] drains each link's outbound queue and feeds
//! the messages to the node on the other end. Every message is passed through
//! the wire encoding on the way.
//!
//! Delivery is synchronous and ordered, so a scenario either converges
//! deterministically or [`TestNetwork::pump`] gives up after
//! [`MAX_PUMP_ROUNDS`].

use std::sync::Arc;

use hc_01_ledger::{GenesisConfig, Ledger, LedgerApi};
use hc_02_peer_registry::{PeerLink, PeerRegistry};
use hc_03_replication::{HandleOutcome, ReplicationApi, ReplicationService};
use shared_types::{Block, LinkDirection, PeerId, ProtocolMessage};
use tokio::sync::mpsc;

/// Upper bound on delivery rounds before a scenario is declared divergent.
pub const MAX_PUMP_ROUNDS: usize = 1_000;

/// One node of the test network.
pub struct TestNode {
    pub name: String,
    pub replication: Arc<ReplicationService<Ledger, PeerRegistry>>,
}

impl TestNode {
    fn new(name: String, genesis: &GenesisConfig) -> Self {
        let replication = Arc::new(ReplicationService::new(
            Arc::new(Ledger::new(genesis)),
            Arc::new(PeerRegistry::new()),
        ));
        Self { name, replication }
    }

    pub fn ledger(&self) -> &Arc<Ledger> {
        self.replication.ledger()
    }

    pub fn registry(&self) -> &Arc<PeerRegistry> {
        self.replication.network()
    }

    pub fn chain(&self) -> Vec<Block> {
        self.replication.chain()
    }

    /// Local submission, as the control API would do it.
    pub fn mine(&self, data: &str) -> Block {
        self.replication
            .submit_data(data.to_string())
            .unwrap_or_else(|e| panic!("{}: local append failed: {e}", self.name))
    }
}

/// One direction of a connection.
struct Pipe {
    from: usize,
    to: usize,
    /// Link id, on the receiving node, that represents the sender.
    receiver_link: PeerId,
    /// Link id, on the sending node, that represents the receiver.
    sender_link: PeerId,
    outbox: mpsc::Receiver<ProtocolMessage>,
}

/// A message delivered by the pump.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub from: usize,
    pub to: usize,
    pub message: ProtocolMessage,
    pub outcome: Option<HandleOutcome>,
}

/// Nodes plus the connections between them.
pub struct TestNetwork {
    nodes: Vec<TestNode>,
    pipes: Vec<Pipe>,
    log: Vec<Delivery>,
}

impl TestNetwork {
    /// `count` nodes sharing the default genesis.
    pub fn new(count: usize) -> Self {
        Self::with_geneses(vec![GenesisConfig::default(); count])
    }

    /// One node per genesis configuration.
    pub fn with_geneses(geneses: Vec<GenesisConfig>) -> Self {
        let nodes = geneses
            .iter()
            .enumerate()
            .map(|(i, g)| TestNode::new(format!("node-{i}"), g))
            .collect();
        Self {
            nodes,
            pipes: Vec::new(),
            log: Vec::new(),
        }
    }

    pub fn node(&self, index: usize) -> &TestNode {
        &self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Open a link between `a` (dialer) and `b` (listener).
    ///
    /// Both sides run their connect handler, so each queues a `QueryLatest`.
    pub fn connect(&mut self, a: usize, b: usize) {
        let a_id = self.nodes[a].registry().allocate_id();
        let b_id = self.nodes[b].registry().allocate_id();

        let (a_link, a_outbox) = PeerLink::new(
            a_id,
            self.nodes[b].name.clone(),
            LinkDirection::Outbound,
            hc_02_peer_registry::DEFAULT_LINK_QUEUE,
        );
        let (b_link, b_outbox) = PeerLink::new(
            b_id,
            self.nodes[a].name.clone(),
            LinkDirection::Inbound,
            hc_02_peer_registry::DEFAULT_LINK_QUEUE,
        );

        self.pipes.push(Pipe {
            from: a,
            to: b,
            receiver_link: b_id,
            sender_link: a_id,
            outbox: a_outbox,
        });
        self.pipes.push(Pipe {
            from: b,
            to: a,
            receiver_link: a_id,
            sender_link: b_id,
            outbox: b_outbox,
        });

        self.nodes[a]
            .replication
            .on_peer_connected(a_link)
            .expect("register dialer side");
        self.nodes[b]
            .replication
            .on_peer_connected(b_link)
            .expect("register listener side");
    }

    /// Close every link between `a` and `b` from both sides.
    pub fn disconnect(&mut self, a: usize, b: usize) {
        let between = |p: &Pipe| (p.from == a && p.to == b) || (p.from == b && p.to == a);
        for pipe in self.pipes.iter().filter(|p| between(p)) {
            self.nodes[pipe.from]
                .replication
                .on_peer_disconnected(pipe.sender_link);
        }
        self.pipes.retain(|p| !between(p));
    }

    /// Deliver queued messages until every queue is empty.
    ///
    /// A handler error closes the link on both sides, as the transport does.
    ///
    /// # Panics
    /// If the network is still busy after [`MAX_PUMP_ROUNDS`] rounds.
    pub fn pump(&mut self) -> usize {
        let mut delivered = 0;
        for _ in 0..MAX_PUMP_ROUNDS {
            let mut batch = Vec::new();
            for (i, pipe) in self.pipes.iter_mut().enumerate() {
                while let Ok(message) = pipe.outbox.try_recv() {
                    batch.push((i, message));
                }
            }
            if batch.is_empty() {
                return delivered;
            }

            let mut failed = Vec::new();
            for (i, message) in batch {
                let pipe = &self.pipes[i];
                let frame = message.encode().expect("encode");
                let decoded = ProtocolMessage::decode(&frame).expect("decode");
                let result = self.nodes[pipe.to]
                    .replication
                    .handle_message(pipe.receiver_link, decoded);
                delivered += 1;
                self.log.push(Delivery {
                    from: pipe.from,
                    to: pipe.to,
                    message,
                    outcome: result.as_ref().ok().cloned(),
                });
                if result.is_err() {
                    failed.push((pipe.from, pipe.to));
                }
            }
            for (a, b) in failed {
                self.disconnect(a, b);
            }
        }
        panic!("network did not settle within {MAX_PUMP_ROUNDS} rounds");
    }

    /// Deliver `message` to `to` as if sent by `from` over an existing link.
    pub fn inject(&mut self, from: usize, to: usize, message: ProtocolMessage) -> Option<HandleOutcome> {
        let pipe = self
            .pipes
            .iter()
            .find(|p| p.from == from && p.to == to)
            .expect("no link between these nodes");
        let result = self.nodes[to]
            .replication
            .handle_message(pipe.receiver_link, message.clone());
        let outcome = result.as_ref().ok().cloned();
        self.log.push(Delivery {
            from,
            to,
            message,
            outcome: outcome.clone(),
        });
        if result.is_err() {
            self.disconnect(from, to);
        }
        outcome
    }

    /// Every delivery so far, in order.
    pub fn log(&self) -> &[Delivery] {
        &self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    pub fn chains(&self) -> Vec<Vec<Block>> {
        self.nodes.iter().map(TestNode::chain).collect()
    }

    /// Whether every node holds the same chain.
    pub fn converged(&self) -> bool {
        let chains = self.chains();
        chains.windows(2).all(|w| w[0] == w[1])
    }

    /// Whether every node's chain passes its own validator.
    pub fn all_chains_valid(&self) -> bool {
        self.nodes
            .iter()
            .all(|n| n.ledger().is_valid_chain(&n.chain()))
    }
}
