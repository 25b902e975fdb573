//! Minimal SNTP client used to report a reference clock next to the
//! server's own.

use std::time::Duration;

use tokio::net::UdpSocket;

/// Seconds between the NTP epoch (1900) and the Unix epoch (1970).
pub const NTP_UNIX_OFFSET: i64 = 2_208_988_800;

const PACKET_LEN: usize = 48;

/// Index of the transmit-timestamp seconds word in the 12-word header.
const TRANSMIT_SECONDS_WORD: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum NtpError {
    #[error("NTP socket error: {0}")]
    Io(#[from] std::io::Error),

    #[error("NTP server did not answer within {0:?}")]
    Timeout(Duration),

    #[error("NTP reply too short: {0} bytes")]
    ShortPacket(usize),
}

/// Client request: LI = 0, version 3, mode 3 (client), rest zeroed.
pub fn request_packet() -> [u8; PACKET_LEN] {
    let mut packet = [0u8; PACKET_LEN];
    packet[0] = 0x1b;
    packet
}

/// Extract the transmit timestamp as Unix seconds.
pub fn decode_unix_seconds(packet: &[u8]) -> Result<i64, NtpError> {
    if packet.len() < PACKET_LEN {
        return Err(NtpError::ShortPacket(packet.len()));
    }
    let offset = TRANSMIT_SECONDS_WORD * 4;
    let word = u32::from_be_bytes([
        packet[offset],
        packet[offset + 1],
        packet[offset + 2],
        packet[offset + 3],
    ]);
    Ok(i64::from(word) - NTP_UNIX_OFFSET)
}

/// Query `server` (`host:port`) once. The whole exchange is bounded by
/// `timeout`.
pub async fn fetch_unix_time(server: &str, timeout: Duration) -> Result<i64, NtpError> {
    let exchange = async {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket.send_to(&request_packet(), server).await?;

        let mut buf = [0u8; 1024];
        let (len, _) = socket.recv_from(&mut buf).await?;
        decode_unix_seconds(&buf[..len])
    };

    tokio::time::timeout(timeout, exchange)
        .await
        .map_err(|_| NtpError::Timeout(timeout))?
}
