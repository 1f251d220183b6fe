// crates/zigbee-addr/tests/simulator/transport.rs
use super::VirtualMesh;
use zigbee_addr::{IeeeAddrRequest, NwkAddrRequest, ResolverError, ZdpTransport};

use std::cell::RefCell;
use std::rc::Rc;

/// A `ZdpTransport` that hands every request to the shared `VirtualMesh`.
pub struct SimulatedTransport {
    mesh: Rc<RefCell<VirtualMesh>>,
    /// When set, every send is refused as if the stack had no free buffer.
    pub refuse_sends: bool,
}

impl SimulatedTransport {
    pub fn new(mesh: Rc<RefCell<VirtualMesh>>) -> Self {
        Self {
            mesh,
            refuse_sends: false,
        }
    }
}

impl ZdpTransport for SimulatedTransport {
    fn send_ieee_addr_request(&mut self, request: &IeeeAddrRequest) -> Result<(), ResolverError> {
        if self.refuse_sends {
            return Err(ResolverError::TransportError("APS buffer pool exhausted"));
        }
        self.mesh.borrow_mut().submit_ieee_addr_req(*request);
        Ok(())
    }

    fn send_nwk_addr_request(&mut self, request: &NwkAddrRequest) -> Result<(), ResolverError> {
        if self.refuse_sends {
            return Err(ResolverError::TransportError("APS buffer pool exhausted"));
        }
        self.mesh.borrow_mut().submit_nwk_addr_req(*request);
        Ok(())
    }
}
