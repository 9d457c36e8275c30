//! Frame sink collaborator (§6, expansion): accepts a fully built action
//! frame for injection. The core never implements this — handing a frame
//! to the OS's radio driver is explicitly out of scope (§1). These are
//! reference adapters for offline inspection and same-host loopback
//! testing, analogous to `original_source`'s `drone.json` debug dump, not
//! a production nl80211 injection path.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::net::UdpSocket;
use std::path::Path;

pub trait FrameSink {
    fn send(&mut self, frame: &[u8]) -> io::Result<()>;
}

/// Appends built frames to a file, back to back with no delimiter — every
/// frame this CLI builds is the fixed canonical size, so a reader can
/// split the file on `remoteid::frame::CANONICAL_FRAME_SIZE` boundaries.
pub struct FileSink {
    file: File,
}

impl FileSink {
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }
}

impl FrameSink for FileSink {
    fn send(&mut self, frame: &[u8]) -> io::Result<()> {
        self.file.write_all(frame)
    }
}

/// Sends each frame as one UDP datagram. Loopback-only in practice: a real
/// broadcast still needs the nl80211 primitive §1 excludes, but this is
/// useful for exercising the codec between two processes on one host.
pub struct UdpSink {
    socket: UdpSocket,
}

impl UdpSink {
    pub fn connect(addr: &str) -> io::Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(addr)?;
        Ok(Self { socket })
    }
}

impl FrameSink for UdpSink {
    fn send(&mut self, frame: &[u8]) -> io::Result<()> {
        self.socket.send(frame)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sink_appends_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frames.bin");

        let mut sink = FileSink::create(&path).unwrap();
        sink.send(&[1, 2, 3]).unwrap();
        sink.send(&[4, 5, 6]).unwrap();
        drop(sink);

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn udp_sink_round_trips_a_frame() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        let receiver_addr = receiver.local_addr().unwrap();
        receiver
            .set_read_timeout(Some(std::time::Duration::from_secs(1)))
            .unwrap();

        let mut sink = UdpSink::connect(&receiver_addr.to_string()).unwrap();
        sink.send(&[9, 8, 7]).unwrap();

        let mut buf = [0u8; 16];
        let (n, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], &[9, 8, 7]);
    }
}
