#[macro_use]
extern crate criterion;

use criterion::black_box;
use criterion::Criterion;

use rina_ctrl::codec::WireCodec;
use rina_ctrl::codec::name::Name;
use rina_ctrl::message::payload::{BaseResp, MgmtSdu, WithName};
use rina_ctrl::message::{Envelope, Message, MessageBody};

macro_rules! gen_message_bench {
    ($crit:ident, $name:ident, $message:expr) => {
        $crit.bench_function(concat!(stringify!($name), "_encode"), |b| {
            let message = $message;
            b.iter(|| {
                let mut buf = Vec::with_capacity(message.wire_len());
                message.encode(black_box(&mut buf)).expect("expected Ok");
                buf
            })
        });

        $crit.bench_function(concat!(stringify!($name), "_decode"), |b| {
            let message = $message;
            let mut buf = Vec::new();
            message.encode(&mut buf).unwrap();
            b.iter(|| {
                let mut input = black_box(&buf[..]);
                Message::decode(&mut input).expect("expected Ok")
            })
        });
    };
}

fn envelope() -> Envelope {
    Envelope {
        src_port: 7,
        dst_port: 0,
        src_ipcp_id: 1,
        dst_ipcp_id: 0,
        event_id: 42,
    }
}

pub fn criterion_benchmark(c: &mut Criterion) {
    gen_message_bench!(
        c,
        bench_base_resp,
        Message {
            envelope: envelope(),
            body: MessageBody::AssignToDifResponse(BaseResp { result: 0 }),
        }
    );

    gen_message_bench!(
        c,
        bench_with_name,
        Message {
            envelope: envelope(),
            body: MessageBody::IpcProcessInitialized(WithName {
                name: Name {
                    process_name: "a.ipcp".into(),
                    process_instance: "1".into(),
                    entity_name: "mgmt".into(),
                    entity_instance: "1".into(),
                },
            }),
        }
    );

    gen_message_bench!(
        c,
        bench_management_sdu,
        Message {
            envelope: envelope(),
            body: MessageBody::IpcpManagementSduReadNotif(MgmtSdu {
                port_id: 7,
                sdu: Some(vec![0u8; 256]),
            }),
        }
    );
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
