//! Saturating statistics counters.
//!
//! Each table exposes its counters through a field enum. Increments clamp at
//! `u64::MAX` instead of wrapping.

/// A set of `u64` counters addressed by a field enum.
pub trait StatTable {
    /// Field selector.
    type Field: Copy;

    /// Mutable access to the counter behind `field`.
    fn slot_mut(&mut self, field: Self::Field) -> &mut u64;

    /// Current value of `field`.
    fn get(&self, field: Self::Field) -> u64;

    /// Add `amount` to `field`, saturating at `u64::MAX`.
    fn increment(&mut self, field: Self::Field, amount: u64) {
        let slot = self.slot_mut(field);
        *slot = slot.saturating_add(amount);
    }
}

/// Per-connection counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Bytes received from the peer.
    pub bytes_received: u64,
    /// Bytes sent to the peer.
    pub bytes_sent: u64,
    /// Bidirectional streams opened.
    pub bidi_stream_count: u64,
    /// Unidirectional streams opened.
    pub uni_stream_count: u64,
    /// Streams opened by the peer.
    pub streams_in_count: u64,
    /// Streams opened locally.
    pub streams_out_count: u64,
    /// Key updates performed.
    pub keyupdate_count: u64,
    /// Retransmissions triggered by loss detection.
    pub loss_retransmit_count: u64,
    /// Retransmissions triggered by ack delay expiry.
    pub ack_delay_retransmit_count: u64,
    /// Successful path validations.
    pub path_validation_success_count: u64,
    /// Failed path validations.
    pub path_validation_failure_count: u64,
    /// Retry packets processed.
    pub retry_count: u64,
}

/// Field selector for [`SessionStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStat {
    /// [`SessionStats::bytes_received`].
    BytesReceived,
    /// [`SessionStats::bytes_sent`].
    BytesSent,
    /// [`SessionStats::bidi_stream_count`].
    BidiStreams,
    /// [`SessionStats::uni_stream_count`].
    UniStreams,
    /// [`SessionStats::streams_in_count`].
    StreamsIn,
    /// [`SessionStats::streams_out_count`].
    StreamsOut,
    /// [`SessionStats::keyupdate_count`].
    KeyUpdates,
    /// [`SessionStats::loss_retransmit_count`].
    LossRetransmits,
    /// [`SessionStats::ack_delay_retransmit_count`].
    AckDelayRetransmits,
    /// [`SessionStats::path_validation_success_count`].
    PathValidationSuccess,
    /// [`SessionStats::path_validation_failure_count`].
    PathValidationFailure,
    /// [`SessionStats::retry_count`].
    Retries,
}

impl StatTable for SessionStats {
    type Field = SessionStat;

    fn slot_mut(&mut self, field: SessionStat) -> &mut u64 {
        match field {
            SessionStat::BytesReceived => &mut self.bytes_received,
            SessionStat::BytesSent => &mut self.bytes_sent,
            SessionStat::BidiStreams => &mut self.bidi_stream_count,
            SessionStat::UniStreams => &mut self.uni_stream_count,
            SessionStat::StreamsIn => &mut self.streams_in_count,
            SessionStat::StreamsOut => &mut self.streams_out_count,
            SessionStat::KeyUpdates => &mut self.keyupdate_count,
            SessionStat::LossRetransmits => &mut self.loss_retransmit_count,
            SessionStat::AckDelayRetransmits => &mut self.ack_delay_retransmit_count,
            SessionStat::PathValidationSuccess => &mut self.path_validation_success_count,
            SessionStat::PathValidationFailure => &mut self.path_validation_failure_count,
            SessionStat::Retries => &mut self.retry_count,
        }
    }

    fn get(&self, field: SessionStat) -> u64 {
        match field {
            SessionStat::BytesReceived => self.bytes_received,
            SessionStat::BytesSent => self.bytes_sent,
            SessionStat::BidiStreams => self.bidi_stream_count,
            SessionStat::UniStreams => self.uni_stream_count,
            SessionStat::StreamsIn => self.streams_in_count,
            SessionStat::StreamsOut => self.streams_out_count,
            SessionStat::KeyUpdates => self.keyupdate_count,
            SessionStat::LossRetransmits => self.loss_retransmit_count,
            SessionStat::AckDelayRetransmits => self.ack_delay_retransmit_count,
            SessionStat::PathValidationSuccess => self.path_validation_success_count,
            SessionStat::PathValidationFailure => self.path_validation_failure_count,
            SessionStat::Retries => self.retry_count,
        }
    }
}

/// Per-endpoint counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocketStats {
    /// Bytes received on the endpoint.
    pub bytes_received: u64,
    /// Bytes sent from the endpoint.
    pub bytes_sent: u64,
    /// Datagrams received.
    pub packets_received: u64,
    /// Datagrams sent.
    pub packets_sent: u64,
    /// Datagrams dropped without processing.
    pub packets_ignored: u64,
    /// Connections accepted as a server.
    pub server_sessions: u64,
    /// Connections initiated as a client.
    pub client_sessions: u64,
    /// Stateless resets sent.
    pub stateless_reset_count: u64,
}

/// Field selector for [`SocketStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketStat {
    /// [`SocketStats::bytes_received`].
    BytesReceived,
    /// [`SocketStats::bytes_sent`].
    BytesSent,
    /// [`SocketStats::packets_received`].
    PacketsReceived,
    /// [`SocketStats::packets_sent`].
    PacketsSent,
    /// [`SocketStats::packets_ignored`].
    PacketsIgnored,
    /// [`SocketStats::server_sessions`].
    ServerSessions,
    /// [`SocketStats::client_sessions`].
    ClientSessions,
    /// [`SocketStats::stateless_reset_count`].
    StatelessResets,
}

impl StatTable for SocketStats {
    type Field = SocketStat;

    fn slot_mut(&mut self, field: SocketStat) -> &mut u64 {
        match field {
            SocketStat::BytesReceived => &mut self.bytes_received,
            SocketStat::BytesSent => &mut self.bytes_sent,
            SocketStat::PacketsReceived => &mut self.packets_received,
            SocketStat::PacketsSent => &mut self.packets_sent,
            SocketStat::PacketsIgnored => &mut self.packets_ignored,
            SocketStat::ServerSessions => &mut self.server_sessions,
            SocketStat::ClientSessions => &mut self.client_sessions,
            SocketStat::StatelessResets => &mut self.stateless_reset_count,
        }
    }

    fn get(&self, field: SocketStat) -> u64 {
        match field {
            SocketStat::BytesReceived => self.bytes_received,
            SocketStat::BytesSent => self.bytes_sent,
            SocketStat::PacketsReceived => self.packets_received,
            SocketStat::PacketsSent => self.packets_sent,
            SocketStat::PacketsIgnored => self.packets_ignored,
            SocketStat::ServerSessions => self.server_sessions,
            SocketStat::ClientSessions => self.client_sessions,
            SocketStat::StatelessResets => self.stateless_reset_count,
        }
    }
}
