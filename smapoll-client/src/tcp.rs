//! Modbus TCP implementation of the register transport: MBAP framing plus
//! function code 0x03 (read holding registers), one request in flight at a
//! time.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use smapoll::{RegisterTransport, TransportError};

const PROTOCOL_ID: u16 = 0x0000;
const MBAP_HEADER_LENGTH: usize = 7;
const READ_HOLDING_REGISTERS: u8 = 0x03;
// length field counts the unit id plus the PDU; an exception PDU is the
// shortest possible response
const MIN_LENGTH_FIELD: usize = 3;
const MAX_LENGTH_FIELD: usize = 254;

pub(crate) struct ModbusTcpTransport {
    address: SocketAddr,
    unit_id: u8,
    timeout: Duration,
    stream: Option<TcpStream>,
    tx_id: u16,
}

impl ModbusTcpTransport {
    pub(crate) fn new(address: SocketAddr, unit_id: u8, timeout: Duration) -> Self {
        ModbusTcpTransport {
            address,
            unit_id,
            timeout,
            stream: None,
            tx_id: 0,
        }
    }

    fn next_tx_id(&mut self) -> u16 {
        self.tx_id = self.tx_id.wrapping_add(1);
        self.tx_id
    }

    async fn transact(
        stream: &mut TcpStream,
        request: &[u8],
        tx_id: u16,
        count: u16,
    ) -> Result<Vec<u16>, TransportError> {
        stream.write_all(request).await?;

        let mut header = [0u8; MBAP_HEADER_LENGTH];
        stream.read_exact(&mut header).await?;
        let rx_tx_id = u16::from_be_bytes([header[0], header[1]]);
        let protocol_id = u16::from_be_bytes([header[2], header[3]]);
        let length = usize::from(u16::from_be_bytes([header[4], header[5]]));
        if protocol_id != PROTOCOL_ID {
            return Err(TransportError::BadFrame("unknown protocol id"));
        }
        if rx_tx_id != tx_id {
            return Err(TransportError::BadFrame("transaction id mismatch"));
        }
        if !(MIN_LENGTH_FIELD..=MAX_LENGTH_FIELD).contains(&length) {
            return Err(TransportError::BadFrame("bad length field"));
        }

        // the unit id (header[6]) counts towards the length field
        let mut pdu = vec![0u8; length - 1];
        stream.read_exact(&mut pdu).await?;

        let function = pdu[0];
        if function == READ_HOLDING_REGISTERS | 0x80 {
            return Err(TransportError::Exception(pdu[1]));
        }
        if function != READ_HOLDING_REGISTERS {
            return Err(TransportError::BadFrame("unexpected function code"));
        }

        let byte_count = usize::from(pdu[1]);
        let payload = &pdu[2..];
        if byte_count != payload.len() || byte_count != usize::from(count) * 2 {
            return Err(TransportError::BadFrame("byte count mismatch"));
        }
        Ok(payload
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect())
    }
}

#[async_trait]
impl RegisterTransport for ModbusTcpTransport {
    async fn open(&mut self) -> Result<(), TransportError> {
        let stream = tokio::time::timeout(self.timeout, TcpStream::connect(self.address))
            .await
            .map_err(|_| TransportError::Io(std::io::ErrorKind::TimedOut))??;
        stream.set_nodelay(true)?;
        self.stream = Some(stream);
        Ok(())
    }

    async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            let _ = stream.shutdown().await;
        }
    }

    fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    async fn read_registers(
        &mut self,
        address: u16,
        count: u16,
    ) -> Result<Vec<u16>, TransportError> {
        let tx_id = self.next_tx_id();
        let unit_id = self.unit_id;
        let timeout = self.timeout;
        let stream = self.stream.as_mut().ok_or(TransportError::NotOpen)?;

        let mut request = [0u8; 12];
        request[0..2].copy_from_slice(&tx_id.to_be_bytes());
        request[2..4].copy_from_slice(&PROTOCOL_ID.to_be_bytes());
        request[4..6].copy_from_slice(&6u16.to_be_bytes());
        request[6] = unit_id;
        request[7] = READ_HOLDING_REGISTERS;
        request[8..10].copy_from_slice(&address.to_be_bytes());
        request[10..12].copy_from_slice(&count.to_be_bytes());

        tokio::time::timeout(timeout, Self::transact(stream, &request, tx_id, count))
            .await
            .map_err(|_| TransportError::Io(std::io::ErrorKind::TimedOut))?
    }
}
